//! Median-effect dose estimation.
//!
//! Responsibilities:
//!
//! - validate experiments (reject, never repair)
//! - compute Kärber estimates (trapezoid, closed form, log trapezoid)
//! - pick the estimator for an experiment and flag inconsistent choices

pub mod karber;
pub mod selection;
pub mod validate;

pub use karber::*;
pub use selection::*;
pub use validate::*;
