//! Command-line parsing for the Kärber LD50/ED50 estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the estimation code.
//!
//! Every experiment parameter can also come from the environment (`LD50_*`),
//! including a `.env` file in the working directory.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{
    DEFAULT_COEFFICIENT, DEFAULT_DOSE_COUNT, DEFAULT_MAX_ANIMALS, DEFAULT_START_DOSE, Method, Mode,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "ld50",
    version,
    about = "Median-effect dose (LD50/ED50) estimation by Kärber's method",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate the median-effect dose, print a summary/plot, and optionally export.
    Estimate(EstimateArgs),
    /// Print a generated geometric dose series.
    Series(SeriesArgs),
    /// Plot a previously exported result JSON.
    Plot(PlotArgs),
}

/// Group size and outcome interpretation.
#[derive(Debug, Args, Clone)]
pub struct ExperimentArgs {
    /// What outcome counts mean (ld50: deaths, ed50: responders).
    #[arg(long, value_enum, env = "LD50_MODE", default_value_t = Mode::Ld50)]
    pub mode: Mode,

    /// Number of animals in each dose group.
    #[arg(
        long,
        env = "LD50_MAX_ANIMALS",
        default_value_t = DEFAULT_MAX_ANIMALS,
        value_parser = clap::value_parser!(u32).range(1..=1000)
    )]
    pub max_animals: u32,
}

/// Parameters of a generated geometric dose series.
#[derive(Debug, Args, Clone)]
pub struct SeriesParams {
    /// First (highest) dose of the generated series.
    #[arg(long, env = "LD50_START_DOSE", default_value_t = DEFAULT_START_DOSE)]
    pub start_dose: f64,

    /// Ratio between successive doses.
    #[arg(long, env = "LD50_COEFFICIENT", default_value_t = DEFAULT_COEFFICIENT)]
    pub coefficient: f64,
}

/// Options for estimation.
#[derive(Debug, Args, Clone)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,

    #[command(flatten)]
    pub series: SeriesParams,

    /// Number of doses in the generated series (defaults to the number of outcomes).
    #[arg(long, env = "LD50_COUNT", value_parser = clap::value_parser!(u64).range(2..=100))]
    pub count: Option<u64>,

    /// Explicit doses, highest first (comma-separated). Without it a series is generated.
    #[arg(long, value_delimiter = ',', conflicts_with = "input")]
    pub doses: Vec<f64>,

    /// Outcome count per dose (comma-separated).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, conflicts_with = "input")]
    pub outcomes: Vec<i64>,

    /// Trial table CSV with an outcome column and an optional dose column.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Apply spreadsheet-style coercions to the CSV instead of rejecting bad cells.
    #[arg(long, requires = "input")]
    pub lenient: bool,

    /// Estimator to use.
    #[arg(long, value_enum, default_value_t = Method::Auto)]
    pub method: Method,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,

    /// Export the projected response curve to CSV.
    #[arg(long = "export-curve", value_name = "CSV")]
    pub export_curve: Option<PathBuf>,

    /// Export the full result (experiment, estimate, curve) to JSON.
    #[arg(long = "export-result", value_name = "JSON")]
    pub export_result: Option<PathBuf>,
}

/// Options for printing a dose series.
#[derive(Debug, Args, Clone)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub series: SeriesParams,

    /// Number of doses.
    #[arg(
        long,
        env = "LD50_COUNT",
        default_value_t = DEFAULT_DOSE_COUNT as u64,
        value_parser = clap::value_parser!(u64).range(2..=100)
    )]
    pub count: u64,
}

/// Options for plotting a saved result.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Result JSON file produced by `ld50 estimate --export-result`.
    #[arg(long, value_name = "JSON")]
    pub result: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,
}
