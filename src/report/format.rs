//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the estimation code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{CurveProjection, DoseInput, Experiment};
use crate::estimate::Estimate;

/// Format the run summary (experiment parameters, estimate, warnings).
pub fn format_run_summary(experiment: &Experiment, estimate: &Estimate) -> String {
    let mut out = String::new();
    let mode = experiment.mode.display_name();

    out.push_str(&format!("=== ld50 - Kärber {mode} estimate ===\n"));
    out.push_str(&format!("Group size: {}\n", experiment.max_animals));
    match &experiment.doses {
        DoseInput::Explicit { doses } => {
            out.push_str(&format!("Doses: explicit (n={})\n", doses.len()));
        }
        DoseInput::Generated(spec) => {
            out.push_str(&format!(
                "Doses: generated (start={}, coefficient={}, n={})\n",
                fmt_dose(spec.start_dose),
                spec.coefficient,
                spec.count
            ));
        }
    }
    out.push_str(&format!("Method: {}\n", estimate.result.method.display_name()));
    out.push_str(&format!("\nResult: {mode} = {}\n", fmt_dose(estimate.result.dose)));

    for w in &estimate.warnings {
        out.push_str(&format!("warning: {w}\n"));
    }

    out
}

/// Format the trial table with the projected percentage next to each row.
pub fn format_trial_table(experiment: &Experiment, projection: &CurveProjection) -> String {
    let mode = experiment.mode;
    let mut out = String::new();

    out.push_str(&format!(
        "{:>3}  {:>14}  {:>10}  {:>13}\n",
        "#",
        "dose",
        mode.outcome_label(),
        mode.percent_label()
    ));
    for (idx, (point, outcome)) in projection.points.iter().zip(&experiment.outcomes).enumerate() {
        out.push_str(&format!(
            "{:>3}  {:>14}  {:>10}  {:>13.1}\n",
            idx + 1,
            fmt_dose(point.dose),
            format!("{outcome}/{}", experiment.max_animals),
            point.response_percent
        ));
    }

    out
}

/// Format a dose series, one dose per line.
pub fn format_series(doses: &[f64]) -> String {
    doses.iter().map(|&d| format!("{}\n", fmt_dose(d))).collect()
}

/// Two decimals for ordinary doses, scientific notation for tiny ones.
pub fn fmt_dose(v: f64) -> String {
    if v == 0.0 || v.abs() >= 0.01 {
        format!("{v:.2}")
    } else {
        format!("{v:.3e}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EstimationResult, Method, Mode};
    use crate::report::project_response_curve;

    fn experiment() -> Experiment {
        Experiment {
            mode: Mode::Ld50,
            max_animals: 8,
            doses: DoseInput::Explicit {
                doses: vec![100.0, 10.0],
            },
            outcomes: vec![2, 8],
        }
    }

    #[test]
    fn fmt_dose_switches_to_scientific_for_tiny_values() {
        assert_eq!(fmt_dose(996_356.35), "996356.35");
        assert_eq!(fmt_dose(0.1), "0.10");
        assert_eq!(fmt_dose(0.0001), "1.000e-4");
    }

    #[test]
    fn summary_reports_mode_and_warnings() {
        let estimate = Estimate {
            result: EstimationResult {
                mode: Mode::Ld50,
                method: Method::Trapezoid,
                dose: 55.0,
            },
            doses: vec![100.0, 10.0],
            warnings: vec!["check me".to_string()],
        };
        let txt = format_run_summary(&experiment(), &estimate);
        assert!(txt.contains("Result: LD50 = 55.00\n"));
        assert!(txt.contains("Method: trapezoid\n"));
        assert!(txt.contains("warning: check me\n"));
    }

    #[test]
    fn trial_table_golden() {
        let exp = experiment();
        let projection = project_response_curve(&[100.0, 10.0], &exp.outcomes, 8, Mode::Ld50, None).unwrap();
        let txt = format_trial_table(&exp, &projection);
        let expected = concat!(
            "  #            dose        died    % surviving\n",
            "  1          100.00         2/8           75.0\n",
            "  2           10.00         8/8            0.0\n",
        );
        assert_eq!(txt, expected);
    }
}
