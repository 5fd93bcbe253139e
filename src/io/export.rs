//! Export the projected response curve to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or plotting scripts.

use std::path::Path;

use serde::Serialize;

use crate::domain::{CurveProjection, TrialRecord};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct CurveRow<'a> {
    dose: f64,
    outcome: u32,
    max_animals: u32,
    response_percent: f64,
    mode: &'a str,
}

/// Write one row per dose level: dose, raw outcome and projected percentage.
pub fn write_curve_csv(
    path: &Path,
    records: &[TrialRecord],
    max_animals: u32,
    projection: &CurveProjection,
) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    let mode = projection.mode.display_name();
    for (record, point) in records.iter().zip(&projection.points) {
        writer
            .serialize(CurveRow {
                dose: record.dose,
                outcome: record.outcome,
                max_animals,
                response_percent: point.response_percent,
                mode,
            })
            .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
