//! Kärber estimators of the median-effect dose.
//!
//! Doses are ordered from highest to lowest and `p[i] = outcome[i] / max_animals`.
//!
//! - Trapezoid (arbitrary spacing):
//!   `D50 = dose[0] - Σ (dose[i] - dose[i+1]) * (p[i] + p[i+1]) / 2`
//! - Closed form (uniform log spacing with ratio `c`):
//!   `log10 D50 = log10(max_dose) - log10(c) * (Σ p[i] - 0.5)`
//! - Log trapezoid: the trapezoid sum taken over `log10(dose)`.
//!
//! The closed form is the log trapezoid on a geometric series whose first
//! proportion is 0 and last is 1. It is not the linear trapezoid; the two only
//! coincide on degenerate data (see `estimate::selection` for how a mismatch is
//! reported).
//!
//! Every function validates its input and returns a typed error instead of
//! NaN/Inf.

use crate::domain::proportions;
use crate::error::{EstimationError, KarberError};

use super::validate::{validate_experiment, validate_trials};

/// Trapezoidal Kärber estimate for an explicit, non-increasing dose list.
pub fn estimate_median_dose_trapezoid(
    doses: &[f64],
    outcomes: &[u32],
    max_animals: u32,
) -> Result<f64, EstimationError> {
    validate_trials(doses, outcomes, max_animals)?;
    let p = proportions(outcomes, max_animals);

    let area: f64 = doses
        .windows(2)
        .zip(p.windows(2))
        .map(|(d, p)| (d[0] - d[1]) * (p[0] + p[1]) / 2.0)
        .sum();

    finite(doses[0] - area)
}

/// Closed-form Kärber estimate for a geometric series `max_dose / coefficient^i`.
///
/// The series length is the number of outcomes.
pub fn estimate_median_dose_log_uniform(
    max_dose: f64,
    coefficient: f64,
    outcomes: &[u32],
    max_animals: u32,
) -> Result<f64, EstimationError> {
    validate_experiment(None, outcomes, max_animals, Some(max_dose), Some(coefficient))?;
    let sum_p: f64 = proportions(outcomes, max_animals).iter().sum();

    let log_d50 = max_dose.log10() - coefficient.log10() * (sum_p - 0.5);
    finite(10f64.powf(log_d50))
}

/// Trapezoidal Kärber estimate computed on `log10(dose)`.
pub fn estimate_median_dose_log_trapezoid(
    doses: &[f64],
    outcomes: &[u32],
    max_animals: u32,
) -> Result<f64, EstimationError> {
    validate_trials(doses, outcomes, max_animals)?;
    let p = proportions(outcomes, max_animals);
    let logs: Vec<f64> = doses.iter().map(|d| d.log10()).collect();

    let area: f64 = logs
        .windows(2)
        .zip(p.windows(2))
        .map(|(l, p)| (l[0] - l[1]) * (p[0] + p[1]) / 2.0)
        .sum();

    finite(10f64.powf(logs[0] - area))
}

fn finite(value: f64) -> Result<f64, EstimationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(KarberError::invalid("estimate", value))
    }
}
