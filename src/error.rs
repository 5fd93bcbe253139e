//! Error types.
//!
//! Two layers:
//!
//! - [`KarberError`]: typed failures of the pure estimation core (validation
//!   and estimation). No I/O, no exit codes.
//! - [`AppError`]: process-level error carrying the exit code for the `ld50`
//!   binary. Core errors convert into it with exit code 3.

use thiserror::Error;

/// Exit code for usage, parse and I/O failures.
pub const EXIT_INPUT: u8 = 2;

/// Exit code for experiments rejected by validation or estimation.
pub const EXIT_ESTIMATE: u8 = 3;

/// Failure of a core (validated) operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KarberError {
    #[error("dose count ({doses}) does not match outcome count ({outcomes})")]
    ShapeMismatch { doses: usize, outcomes: usize },

    #[error("doses must be non-increasing: dose[{index}] = {dose} is below dose[{}] = {next}", .index + 1)]
    NonMonotonicDoses { index: usize, dose: f64, next: f64 },

    #[error("outcome[{index}] = {outcome} is outside 0..={max_animals}")]
    OutcomeOutOfRange {
        index: usize,
        outcome: i64,
        max_animals: u32,
    },

    #[error("at least 2 dose levels are required, got {found}")]
    InsufficientDoses { found: usize },

    #[error("invalid {name}: {value} (must be finite and > 0)")]
    InvalidParameter { name: &'static str, value: f64 },
}

impl KarberError {
    pub(crate) fn invalid(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter { name, value }
    }
}

/// Error returned by [`crate::estimate::validate_experiment`].
pub type ValidationError = KarberError;

/// Error returned by the estimators in [`crate::estimate::karber`].
pub type EstimationError = KarberError;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<KarberError> for AppError {
    fn from(err: KarberError) -> Self {
        Self::new(EXIT_ESTIMATE, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
