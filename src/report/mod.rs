//! Reporting utilities: response-curve projection and formatted terminal output.

use crate::domain::{CurveAnnotation, CurvePoint, CurveProjection, Mode};
use crate::error::KarberError;
use crate::estimate::validate_levels;

pub mod format;

pub use format::*;

/// Horizontal reference line drawn at the median response.
pub const REFERENCE_PERCENT: f64 = 50.0;

/// Project raw outcome counts onto a percentage curve.
///
/// - `Mode::Ld50`: percent surviving, `(1 - outcome / max_animals) * 100`
/// - `Mode::Ed50`: percent responding, `outcome / max_animals * 100`
///
/// Points keep the input (descending) dose order. When `estimate` is given,
/// the projection carries the vertical marker at the estimate and the
/// horizontal marker at 50%.
pub fn project_response_curve(
    doses: &[f64],
    outcomes: &[u32],
    max_animals: u32,
    mode: Mode,
    estimate: Option<f64>,
) -> Result<CurveProjection, KarberError> {
    validate_levels(doses, outcomes, max_animals)?;

    let n = f64::from(max_animals);
    let points = doses
        .iter()
        .zip(outcomes)
        .map(|(&dose, &outcome)| {
            let p = f64::from(outcome) / n;
            let response_percent = match mode {
                Mode::Ld50 => (1.0 - p) * 100.0,
                Mode::Ed50 => p * 100.0,
            };
            CurvePoint { dose, response_percent }
        })
        .collect();

    let annotation = match estimate {
        Some(d) if d.is_finite() && d > 0.0 => Some(CurveAnnotation {
            estimate_dose: d,
            reference_percent: REFERENCE_PERCENT,
        }),
        Some(d) => return Err(KarberError::invalid("estimate", d)),
        None => None,
    };

    Ok(CurveProjection { mode, points, annotation })
}
