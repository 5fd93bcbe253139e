//! Mathematical utilities: geometric dose series.

pub mod series;

pub use series::*;
