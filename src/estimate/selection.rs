//! Estimator selection for a full [`Experiment`].
//!
//! `Method::Auto` follows the shape of the input:
//! explicit doses use the trapezoid form, a generated series uses the closed
//! form. Forcing the closed form onto explicit doses is allowed, but when those
//! doses are not a uniform geometric series the result is flagged with the
//! trapezoid value for comparison.

use crate::domain::{DoseInput, EstimationResult, Experiment, Method};
use crate::error::EstimationError;
use crate::math::{geometric_ratio, series_from_spec};

use super::karber::{
    estimate_median_dose_log_trapezoid, estimate_median_dose_log_uniform, estimate_median_dose_trapezoid,
};
use super::validate::validate;

/// Output of [`estimate_experiment`].
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub result: EstimationResult,
    /// Doses the estimate was computed on (generated or explicit).
    pub doses: Vec<f64>,
    /// Caveats a caller should surface next to the number.
    pub warnings: Vec<String>,
}

/// Resolve `Method::Auto` for the given dose input.
pub fn resolve_method(method: Method, doses: &DoseInput) -> Method {
    match (method, doses) {
        (Method::Auto, DoseInput::Explicit { .. }) => Method::Trapezoid,
        (Method::Auto, DoseInput::Generated(_)) => Method::LogUniform,
        (m, _) => m,
    }
}

/// Validate the experiment and compute its median-effect dose.
pub fn estimate_experiment(experiment: &Experiment, method: Method) -> Result<Estimate, EstimationError> {
    validate(experiment)?;

    let outcomes = &experiment.outcomes;
    let max_animals = experiment.max_animals;
    let method = resolve_method(method, &experiment.doses);
    let mut warnings = Vec::new();

    let doses = match &experiment.doses {
        DoseInput::Explicit { doses } => doses.clone(),
        DoseInput::Generated(spec) => {
            if spec.coefficient <= 1.0 {
                warnings.push(format!(
                    "dose coefficient {} <= 1: the generated series does not decrease",
                    spec.coefficient
                ));
            }
            series_from_spec(spec)?
        }
    };

    let dose = match method {
        Method::Trapezoid | Method::Auto => estimate_median_dose_trapezoid(&doses, outcomes, max_animals)?,
        Method::LogTrapezoid => estimate_median_dose_log_trapezoid(&doses, outcomes, max_animals)?,
        Method::LogUniform => match &experiment.doses {
            DoseInput::Generated(spec) => {
                estimate_median_dose_log_uniform(spec.start_dose, spec.coefficient, outcomes, max_animals)?
            }
            DoseInput::Explicit { doses } => match geometric_ratio(doses) {
                Some(ratio) => estimate_median_dose_log_uniform(doses[0], ratio, outcomes, max_animals)?,
                None => {
                    let trapezoid = estimate_median_dose_trapezoid(doses, outcomes, max_animals)?;
                    let ratio = doses[0] / doses[1];
                    let closed = estimate_median_dose_log_uniform(doses[0], ratio, outcomes, max_animals)?;
                    warnings.push(format!(
                        "doses are not a uniform geometric series; the closed form assumes ratio {ratio} \
                         and gives {closed:.4}, the trapezoid form gives {trapezoid:.4}"
                    ));
                    closed
                }
            },
        },
    };

    Ok(Estimate {
        result: EstimationResult {
            mode: experiment.mode,
            method,
            dose,
        },
        doses,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Mode, SeriesSpec};
    use crate::error::KarberError;

    fn explicit(doses: Vec<f64>, outcomes: Vec<u32>) -> Experiment {
        Experiment {
            mode: Mode::Ld50,
            max_animals: 8,
            doses: DoseInput::Explicit { doses },
            outcomes,
        }
    }

    #[test]
    fn auto_uses_trapezoid_for_explicit_doses() {
        let exp = explicit(vec![1e6, 1e5, 1e4, 1e3, 1e2, 10.0, 1.0, 0.1], vec![0, 0, 0, 5, 8, 8, 8, 8]);
        let est = estimate_experiment(&exp, Method::Auto).unwrap();
        assert_eq!(est.result.method, Method::Trapezoid);
        assert!((est.result.dose - 996_356.35).abs() < 1e-6);
        assert!(est.warnings.is_empty());
    }

    #[test]
    fn auto_uses_closed_form_for_generated_series() {
        let exp = Experiment {
            mode: Mode::Ed50,
            max_animals: 8,
            doses: DoseInput::Generated(SeriesSpec::default()),
            outcomes: vec![0, 0, 0, 4, 8, 8, 8, 8],
        };
        let est = estimate_experiment(&exp, Method::Auto).unwrap();
        assert_eq!(est.result.method, Method::LogUniform);
        assert_eq!(est.result.mode, Mode::Ed50);
        assert!((est.result.dose - 100.0).abs() < 1e-9);
        assert_eq!(est.doses.len(), 8);
    }

    #[test]
    fn closed_form_on_geometric_explicit_doses_is_not_flagged() {
        let exp = explicit(vec![1000.0, 100.0, 10.0, 1.0], vec![0, 2, 6, 8]);
        let est = estimate_experiment(&exp, Method::LogUniform).unwrap();
        assert!(est.warnings.is_empty());
    }

    #[test]
    fn closed_form_on_hand_edited_doses_is_flagged() {
        let exp = explicit(vec![1000.0, 100.0, 50.0, 1.0], vec![0, 2, 6, 8]);
        let est = estimate_experiment(&exp, Method::LogUniform).unwrap();
        assert_eq!(est.warnings.len(), 1);
        assert!(est.warnings[0].contains("not a uniform geometric series"));
    }

    #[test]
    fn validation_runs_before_estimation() {
        let exp = explicit(vec![10.0, 20.0, 5.0], vec![0, 1, 2]);
        assert!(matches!(
            estimate_experiment(&exp, Method::Auto),
            Err(KarberError::NonMonotonicDoses { .. })
        ));
    }
}
