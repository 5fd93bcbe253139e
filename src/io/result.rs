//! Read/write result JSON files.
//!
//! A result JSON is the "portable" representation of one estimation run:
//! - the experiment snapshot (mode, group size, doses, outcomes)
//! - the estimate (value, method) plus any warnings
//! - the projected response curve for quick re-plotting
//!
//! The schema is defined by `domain::ResultFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::ResultFile;
use crate::error::AppError;

/// Write a result JSON file.
pub fn write_result_json(path: &Path, result: &ResultFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create result JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, result)
        .map_err(|e| AppError::input(format!("Failed to write result JSON: {e}")))?;

    Ok(())
}

/// Read a result JSON file.
pub fn read_result_json(path: &Path) -> Result<ResultFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open result JSON '{}': {e}", path.display())))?;
    let result: ResultFile =
        serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid result JSON: {e}")))?;
    Ok(result)
}
