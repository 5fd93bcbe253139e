//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - configuration enums (`Mode`, `Method`)
//! - experiment inputs (`Experiment`, `DoseInput`, `SeriesSpec`, `TrialRecord`)
//! - derived outputs (`EstimationResult`, `CurvePoint`, `CurveProjection`, `ResultFile`)

pub mod types;

pub use types::*;
