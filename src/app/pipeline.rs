//! Shared "estimate pipeline" logic used by the `estimate` command and tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> estimate -> project curve -> (optional) result file
//!
//! The CLI can then focus on presentation (printing vs exporting).

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::{CurveProjection, Experiment, Method, ResultFile, TrialRecord};
use crate::error::AppError;
use crate::estimate::{Estimate, estimate_experiment};
use crate::report::project_response_curve;

/// All computed outputs of a single `ld50 estimate` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub estimate: Estimate,
    pub projection: CurveProjection,
    pub records: Vec<TrialRecord>,
}

/// Execute the full estimation pipeline for one experiment snapshot.
pub fn run_estimate(experiment: &Experiment, method: Method) -> Result<RunOutput, AppError> {
    debug!(
        mode = experiment.mode.display_name(),
        max_animals = experiment.max_animals,
        trials = experiment.outcomes.len(),
        method = method.display_name(),
        "estimating median-effect dose"
    );

    let estimate = estimate_experiment(experiment, method)?;
    for w in &estimate.warnings {
        warn!("{w}");
    }

    let projection = project_response_curve(
        &estimate.doses,
        &experiment.outcomes,
        experiment.max_animals,
        experiment.mode,
        Some(estimate.result.dose),
    )?;
    let records = experiment.records(&estimate.doses);

    info!(
        mode = experiment.mode.display_name(),
        method = estimate.result.method.display_name(),
        dose = estimate.result.dose,
        "estimate computed"
    );

    Ok(RunOutput {
        estimate,
        projection,
        records,
    })
}

/// Build the portable JSON representation of a run.
pub fn result_file(experiment: &Experiment, run: &RunOutput) -> ResultFile {
    ResultFile {
        tool: "ld50".to_string(),
        generated_at: Utc::now(),
        experiment: experiment.clone(),
        doses: run.estimate.doses.clone(),
        estimate: run.estimate.result,
        warnings: run.estimate.warnings.clone(),
        curve: run.projection.clone(),
    }
}
