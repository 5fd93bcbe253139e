//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - builds an experiment snapshot from flags or a CSV table
//! - runs the estimate pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::debug;

use crate::cli::{Cli, Command, EstimateArgs, PlotArgs, SeriesArgs};
use crate::domain::{DoseInput, Experiment, RunConfig, SeriesSpec};
use crate::error::{AppError, KarberError};

pub mod pipeline;

/// Entry point for the `ld50` binary.
pub fn run() -> Result<(), AppError> {
    // Env overrides (`LD50_*`) may live in a local `.env`.
    dotenvy::dotenv().ok();

    // We want `ld50 --outcomes ...` to behave like `ld50 estimate --outcomes ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    crate::logging::init(cli.verbose);

    match cli.command {
        Command::Estimate(args) => handle_estimate(&args),
        Command::Series(args) => handle_series(&args),
        Command::Plot(args) => handle_plot(&args),
    }
}

fn handle_estimate(args: &EstimateArgs) -> Result<(), AppError> {
    let config = run_config_from_args(args)?;
    let experiment = &config.experiment;
    let run = pipeline::run_estimate(experiment, config.method)?;

    println!("{}", crate::report::format_run_summary(experiment, &run.estimate));
    println!("{}", crate::report::format_trial_table(experiment, &run.projection));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(&run.projection, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_curve {
        crate::io::write_curve_csv(path, &run.records, experiment.max_animals, &run.projection)?;
        debug!(path = %path.display(), "curve exported");
    }
    if let Some(path) = &config.export_result {
        crate::io::write_result_json(path, &pipeline::result_file(experiment, &run))?;
        debug!(path = %path.display(), "result exported");
    }

    Ok(())
}

fn handle_series(args: &SeriesArgs) -> Result<(), AppError> {
    let doses = crate::math::generate_dose_series(args.series.start_dose, args.series.coefficient, args.count as usize)?;
    print!("{}", crate::report::format_series(&doses));
    Ok(())
}

fn handle_plot(args: &PlotArgs) -> Result<(), AppError> {
    let saved = crate::io::read_result_json(&args.result)?;

    println!(
        "{} = {} ({}, saved {})",
        saved.estimate.mode.display_name(),
        crate::report::fmt_dose(saved.estimate.dose),
        saved.estimate.method.display_name(),
        saved.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    for w in &saved.warnings {
        println!("warning: {w}");
    }
    println!("{}", crate::plot::render_ascii_plot(&saved.curve, args.width, args.height));
    Ok(())
}

/// Build the run configuration (experiment snapshot + output options) from flags.
pub fn run_config_from_args(args: &EstimateArgs) -> Result<RunConfig, AppError> {
    Ok(RunConfig {
        experiment: experiment_from_args(args)?,
        method: args.method,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_curve: args.export_curve.clone(),
        export_result: args.export_result.clone(),
    })
}

/// Build an experiment snapshot from flags or a CSV table.
///
/// Doses come from, in order: the CSV dose column, `--doses`, the lenient
/// first dose of the CSV, or a series generated from `--start-dose` and
/// `--coefficient`.
pub fn experiment_from_args(args: &EstimateArgs) -> Result<Experiment, AppError> {
    let max_animals = args.experiment.max_animals;

    let (csv_doses, start_dose, outcomes) = match &args.input {
        Some(path) => {
            let table = crate::io::load_trial_table(path, max_animals, args.lenient)?;
            (table.doses, table.start_dose, table.outcomes)
        }
        None => {
            if args.outcomes.is_empty() {
                return Err(AppError::input("No outcomes given: pass --outcomes or --input <CSV>."));
            }
            (None, None, outcomes_from_flags(&args.outcomes, max_animals)?)
        }
    };

    let explicit = match (csv_doses, args.doses.is_empty()) {
        (Some(doses), _) => Some(doses),
        (None, false) => Some(args.doses.clone()),
        (None, true) => None,
    };
    // `--count` only sizes a generated series; with explicit doses it must agree.
    if let (Some(_), Some(count)) = (&explicit, args.count) {
        if count as usize != outcomes.len() {
            return Err(KarberError::ShapeMismatch {
                doses: count as usize,
                outcomes: outcomes.len(),
            }
            .into());
        }
    }

    let doses = match explicit {
        Some(doses) => DoseInput::Explicit { doses },
        None => DoseInput::Generated(SeriesSpec {
            start_dose: start_dose.unwrap_or(args.series.start_dose),
            coefficient: args.series.coefficient,
            count: args.count.map_or(outcomes.len(), |c| c as usize),
        }),
    };

    Ok(Experiment {
        mode: args.experiment.mode,
        max_animals,
        doses,
        outcomes,
    })
}

/// Negative counts are rejected here so they surface as range errors.
fn outcomes_from_flags(raw: &[i64], max_animals: u32) -> Result<Vec<u32>, KarberError> {
    raw.iter()
        .enumerate()
        .map(|(index, &v)| {
            u32::try_from(v).map_err(|_| KarberError::OutcomeOutOfRange {
                index,
                outcome: v,
                max_animals,
            })
        })
        .collect()
}

/// Rewrite argv so flags without a subcommand mean `ld50 estimate`.
///
/// Rules:
/// - `ld50`                          -> unchanged (top-level help)
/// - `ld50 --outcomes 0,4,8 ...`     -> `ld50 estimate --outcomes 0,4,8 ...`
/// - `ld50 --help/--version/-h/-V`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    // If the first token is a flag, treat it as "estimate flags".
    if arg1.starts_with('-') {
        argv.insert(1, "estimate".to_string());
    }

    argv
}
