//! Input/output helpers.
//!
//! - trial-table CSV ingest + edit-layer coercions (`ingest`)
//! - projected curve CSV export (`export`)
//! - result JSON read/write (`result`)

pub mod export;
pub mod ingest;
pub mod result;

pub use export::*;
pub use ingest::*;
pub use result::*;
