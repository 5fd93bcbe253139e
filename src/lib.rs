//! `karber-ld50` library crate.
//!
//! The binary (`ld50`) is a thin wrapper around this library so that:
//!
//! - the estimators are testable without spawning processes
//! - the pure core (series, validation, estimation, projection) is reusable by
//!   other front-ends (GUI, notebooks, services)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod estimate;
pub mod io;
pub mod logging;
pub mod math;
pub mod plot;
pub mod report;
