//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed by value into the pure estimation functions
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default first (highest) dose of a generated series.
pub const DEFAULT_START_DOSE: f64 = 1_000_000.0;

/// Default per-step decay ratio of a generated series.
pub const DEFAULT_COEFFICIENT: f64 = 10.0;

/// Default number of dose levels.
pub const DEFAULT_DOSE_COUNT: usize = 8;

/// Default group size.
pub const DEFAULT_MAX_ANIMALS: u32 = 8;

/// What an outcome count means.
///
/// The estimator arithmetic is identical for both; the mode only changes labels
/// and the direction of the projected response curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Outcome counts deaths; the curve shows percent surviving.
    Ld50,
    /// Outcome counts responders; the curve shows percent responding.
    Ed50,
}

impl Mode {
    pub fn display_name(self) -> &'static str {
        match self {
            Mode::Ld50 => "LD50",
            Mode::Ed50 => "ED50",
        }
    }

    /// Column/axis label for the raw outcome count.
    pub fn outcome_label(self) -> &'static str {
        match self {
            Mode::Ld50 => "died",
            Mode::Ed50 => "responded",
        }
    }

    /// Axis label for the projected percentage.
    pub fn percent_label(self) -> &'static str {
        match self {
            Mode::Ld50 => "% surviving",
            Mode::Ed50 => "% responding",
        }
    }
}

/// Which Kärber form to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Trapezoid for explicit doses, closed form for a generated series.
    Auto,
    /// Trapezoid over linear dose (arbitrary spacing).
    Trapezoid,
    /// Closed form assuming uniform log spacing.
    LogUniform,
    /// Trapezoid over log10(dose).
    LogTrapezoid,
}

impl Method {
    pub fn display_name(self) -> &'static str {
        match self {
            Method::Auto => "auto",
            Method::Trapezoid => "trapezoid",
            Method::LogUniform => "log-uniform",
            Method::LogTrapezoid => "log-trapezoid",
        }
    }
}

/// A geometric dose series: `start, start/c, start/c^2, ...`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub start_dose: f64,
    pub coefficient: f64,
    pub count: usize,
}

impl Default for SeriesSpec {
    fn default() -> Self {
        Self {
            start_dose: DEFAULT_START_DOSE,
            coefficient: DEFAULT_COEFFICIENT,
            count: DEFAULT_DOSE_COUNT,
        }
    }
}

/// Where the doses of an experiment come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DoseInput {
    /// Explicit, non-increasing dose list.
    Explicit { doses: Vec<f64> },
    /// Doses derived from a geometric series.
    Generated(SeriesSpec),
}

/// One dose level and its observed outcome count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub dose: f64,
    pub outcome: u32,
}

/// A complete snapshot of one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub mode: Mode,
    pub max_animals: u32,
    pub doses: DoseInput,
    pub outcomes: Vec<u32>,
}

impl Experiment {
    /// Pair each outcome with its dose.
    pub fn records(&self, doses: &[f64]) -> Vec<TrialRecord> {
        doses
            .iter()
            .zip(&self.outcomes)
            .map(|(&dose, &outcome)| TrialRecord { dose, outcome })
            .collect()
    }
}

/// `outcome / max_animals` for each trial.
pub fn proportions(outcomes: &[u32], max_animals: u32) -> Vec<f64> {
    let n = f64::from(max_animals);
    outcomes.iter().map(|&o| f64::from(o) / n).collect()
}

/// An estimated median-effect dose, tagged with its mode and method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub mode: Mode,
    pub method: Method,
    pub dose: f64,
}

/// A single projected point of the response curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub dose: f64,
    pub response_percent: f64,
}

/// Reference lines a renderer should draw for an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveAnnotation {
    /// Vertical marker position (the estimated dose).
    pub estimate_dose: f64,
    /// Horizontal marker position (always 50%).
    pub reference_percent: f64,
}

/// Everything a renderer needs: points in input order plus optional markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveProjection {
    pub mode: Mode,
    pub points: Vec<CurvePoint>,
    pub annotation: Option<CurveAnnotation>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub experiment: Experiment,
    pub method: Method,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_curve: Option<PathBuf>,
    pub export_result: Option<PathBuf>,
}

/// A saved estimation run (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub experiment: Experiment,
    pub doses: Vec<f64>,
    pub estimate: EstimationResult,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub curve: CurveProjection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportions_divide_by_group_size() {
        let p = proportions(&[0, 4, 8], 8);
        assert_eq!(p, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn dose_input_serializes_with_kind_tag() {
        let input = DoseInput::Generated(SeriesSpec::default());
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["kind"], "generated");
        assert_eq!(json["count"], 8);

        let back: DoseInput = serde_json::from_value(json).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn method_uses_kebab_case_names() {
        let json = serde_json::to_string(&Method::LogUniform).unwrap();
        assert_eq!(json, "\"log-uniform\"");
    }
}
