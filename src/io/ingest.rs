//! CSV ingest of trial tables.
//!
//! A trial table has one row per dose level:
//!
//! ```text
//! dose,outcome
//! 1000000,0
//! 100000,0
//! ...
//! ```
//!
//! The `dose` column is optional; without it the doses come from a generated
//! series. The outcome column may also be named `died`, `deaths`, `responded`
//! or `responders`.
//!
//! Two modes:
//! - **strict** (default): every cell must parse; bad rows are collected and
//!   reported together (exit code 2). Range checks are left to the core
//!   validator so they surface as typed errors.
//! - **lenient**: the coercions a spreadsheet-style editor applies while the
//!   user types. Blank/unparsable outcomes become 0, outcomes above the group
//!   size are clamped to it, and only the first dose is read; the rest of the
//!   series is re-derived from it. The core API never does any of this.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::domain::DEFAULT_START_DOSE;
use crate::error::AppError;

const DOSE_COLUMNS: [&str; 2] = ["dose", "doses"];
const OUTCOME_COLUMNS: [&str; 5] = ["outcome", "died", "deaths", "responded", "responders"];

/// Fallback for a first dose the user typed as non-positive or garbage.
pub const EDIT_FIRST_DOSE_FALLBACK: f64 = 1.0;

/// A row-level problem encountered during ingest (error in strict mode,
/// applied coercion in lenient mode).
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialTable {
    /// Explicit doses (strict mode with a dose column).
    pub doses: Option<Vec<f64>>,
    /// First dose read in lenient mode; the series is re-derived from it.
    pub start_dose: Option<f64>,
    pub outcomes: Vec<u32>,
    /// Coercions applied in lenient mode.
    pub adjustments: Vec<RowError>,
    pub rows_read: usize,
}

/// Load a trial table from CSV.
pub fn load_trial_table(path: &Path, max_animals: u32, lenient: bool) -> Result<TrialTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_trial_table(file, max_animals, lenient)
}

/// Read a trial table from any CSV source.
pub fn read_trial_table<R: std::io::Read>(source: R, max_animals: u32, lenient: bool) -> Result<TrialTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let dose_col = find_column(&header_map, &DOSE_COLUMNS);
    let outcome_col = find_column(&header_map, &OUTCOME_COLUMNS).ok_or_else(|| {
        AppError::input(format!(
            "Missing outcome column (one of: {}).",
            OUTCOME_COLUMNS.join(", ")
        ))
    })?;

    let mut doses = Vec::new();
    let mut outcomes = Vec::new();
    let mut start_dose = None;
    let mut errors = Vec::new();
    let mut adjustments = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let outcome_cell = get_cell(&record, outcome_col);
        let dose_cell = dose_col.map(|c| get_cell(&record, c));

        if lenient {
            let (outcome, note) = coerce_outcome(outcome_cell, max_animals);
            if let Some(message) = note {
                adjustments.push(RowError { line, message });
            }
            outcomes.push(outcome);

            if rows_read == 1 {
                if let Some(cell) = dose_cell {
                    let dose = if cell.is_empty() {
                        coerce_start_dose(None)
                    } else {
                        coerce_first_dose(cell)
                    };
                    if cell.parse::<f64>().ok() != Some(dose) {
                        adjustments.push(RowError {
                            line,
                            message: format!("first dose '{cell}' replaced with {dose}"),
                        });
                    }
                    start_dose = Some(dose);
                }
            }
            continue;
        }

        match parse_outcome(outcome_cell) {
            Ok(o) => outcomes.push(o),
            Err(message) => errors.push(RowError { line, message }),
        }
        if let Some(cell) = dose_cell {
            match cell.parse::<f64>() {
                Ok(d) => doses.push(d),
                Err(_) => errors.push(RowError {
                    line,
                    message: format!("invalid dose '{cell}'"),
                }),
            }
        }
    }

    if !errors.is_empty() {
        let detail: Vec<String> = errors
            .iter()
            .take(5)
            .map(|e| format!("line {}: {}", e.line, e.message))
            .collect();
        return Err(AppError::input(format!(
            "{} invalid row(s) in trial table:\n{}",
            errors.len(),
            detail.join("\n")
        )));
    }

    for a in &adjustments {
        warn!(line = a.line, "{}", a.message);
    }
    debug!(rows = rows_read, has_doses = dose_col.is_some(), lenient, "trial table loaded");

    Ok(TrialTable {
        doses: (dose_col.is_some() && !lenient).then_some(doses),
        start_dose,
        outcomes,
        adjustments,
        rows_read,
    })
}

/// Edit-layer outcome coercion: blank/garbage/negative -> 0, above group size -> group size.
pub fn coerce_outcome(cell: &str, max_animals: u32) -> (u32, Option<String>) {
    match cell.parse::<i64>() {
        Ok(v) if v > i64::from(max_animals) => (
            max_animals,
            Some(format!("outcome {v} clamped to {max_animals}")),
        ),
        Ok(v) if v < 0 => (0, Some(format!("outcome {v} replaced with 0"))),
        Ok(v) => (v as u32, None),
        Err(_) if cell.is_empty() => (0, None),
        Err(_) => (0, Some(format!("outcome '{cell}' replaced with 0"))),
    }
}

/// Edit-layer first-dose coercion: non-positive or unparsable -> 1.0.
pub fn coerce_first_dose(cell: &str) -> f64 {
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => EDIT_FIRST_DOSE_FALLBACK,
    }
}

/// Edit-layer start-dose coercion: missing, non-positive or unparsable -> 1,000,000.
pub fn coerce_start_dose(cell: Option<&str>) -> f64 {
    match cell.map(str::parse::<f64>) {
        Some(Ok(v)) if v.is_finite() && v > 0.0 => v,
        _ => DEFAULT_START_DOSE,
    }
}

fn parse_outcome(cell: &str) -> Result<u32, String> {
    match cell.parse::<i64>() {
        Ok(v) if v < 0 => Err(format!("outcome {v} is negative")),
        Ok(v) => u32::try_from(v).map_err(|_| format!("outcome {v} is too large")),
        Err(_) => Err(format!("invalid outcome '{cell}'")),
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, the dose column goes missing.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn find_column(header_map: &HashMap<String, usize>, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|n| header_map.get(*n).copied())
}

fn get_cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}
