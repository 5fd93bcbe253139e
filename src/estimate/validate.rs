//! Experiment validation.
//!
//! The core API rejects invalid input instead of repairing it. Checks run in a
//! fixed order so the reported error is deterministic:
//!
//! 1. parameters (`max_animals`, start dose, coefficient)
//! 2. shape (dose count vs outcome count)
//! 3. at least two dose levels
//! 4. doses finite, positive and non-increasing
//! 5. every outcome in `0..=max_animals`

use crate::domain::{DoseInput, Experiment};
use crate::error::{KarberError, ValidationError};

/// Validate raw experiment inputs.
///
/// `doses` is `Some` for the explicit-dose path. For the generated-series path
/// pass `None` together with the series `start_dose` and `coefficient`; the
/// series length is then the number of outcomes.
pub fn validate_experiment(
    doses: Option<&[f64]>,
    outcomes: &[u32],
    max_animals: u32,
    start_dose: Option<f64>,
    coefficient: Option<f64>,
) -> Result<(), ValidationError> {
    check_max_animals(max_animals)?;
    if let Some(start) = start_dose {
        check_positive("start dose", start)?;
    }
    if let Some(c) = coefficient {
        check_positive("dose coefficient", c)?;
    }

    match doses {
        Some(doses) => validate_trials(doses, outcomes, max_animals),
        None => {
            check_count(outcomes.len())?;
            check_outcomes(outcomes, max_animals)
        }
    }
}

/// Validate an [`Experiment`] snapshot.
pub fn validate(experiment: &Experiment) -> Result<(), ValidationError> {
    match &experiment.doses {
        DoseInput::Explicit { doses } => validate_experiment(
            Some(doses),
            &experiment.outcomes,
            experiment.max_animals,
            None,
            None,
        ),
        DoseInput::Generated(spec) => {
            if spec.count != experiment.outcomes.len() {
                check_max_animals(experiment.max_animals)?;
                return Err(KarberError::ShapeMismatch {
                    doses: spec.count,
                    outcomes: experiment.outcomes.len(),
                });
            }
            validate_experiment(
                None,
                &experiment.outcomes,
                experiment.max_animals,
                Some(spec.start_dose),
                Some(spec.coefficient),
            )
        }
    }
}

/// Validate an explicit dose list against its outcomes.
pub fn validate_trials(doses: &[f64], outcomes: &[u32], max_animals: u32) -> Result<(), ValidationError> {
    check_dose_levels(doses, outcomes.len(), max_animals)?;
    for (index, w) in doses.windows(2).enumerate() {
        if w[0] < w[1] {
            return Err(KarberError::NonMonotonicDoses {
                index,
                dose: w[0],
                next: w[1],
            });
        }
    }

    check_outcomes(outcomes, max_animals)
}

/// Every check of [`validate_trials`] except dose ordering.
///
/// Projection only relabels outcomes, so it accepts a series generated with a
/// coefficient below 1.
pub fn validate_levels(doses: &[f64], outcomes: &[u32], max_animals: u32) -> Result<(), ValidationError> {
    check_dose_levels(doses, outcomes.len(), max_animals)?;
    check_outcomes(outcomes, max_animals)
}

fn check_dose_levels(doses: &[f64], outcome_count: usize, max_animals: u32) -> Result<(), ValidationError> {
    check_max_animals(max_animals)?;
    if doses.len() != outcome_count {
        return Err(KarberError::ShapeMismatch {
            doses: doses.len(),
            outcomes: outcome_count,
        });
    }
    check_count(doses.len())?;
    for &d in doses {
        check_positive("dose", d)?;
    }
    Ok(())
}

fn check_max_animals(max_animals: u32) -> Result<(), ValidationError> {
    if max_animals == 0 {
        return Err(KarberError::invalid("max animals", 0.0));
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KarberError::invalid(name, value))
    }
}

fn check_count(found: usize) -> Result<(), ValidationError> {
    if found < 2 {
        return Err(KarberError::InsufficientDoses { found });
    }
    Ok(())
}

fn check_outcomes(outcomes: &[u32], max_animals: u32) -> Result<(), ValidationError> {
    match outcomes.iter().position(|&o| o > max_animals) {
        Some(index) => Err(KarberError::OutcomeOutOfRange {
            index,
            outcome: i64::from(outcomes[index]),
            max_animals,
        }),
        None => Ok(()),
    }
}
