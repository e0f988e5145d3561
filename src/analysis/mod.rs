//! Analysis Module
//!
//! Turns the per-run results table into averaged, extrapolated resistance
//! curves.
//!
//! ## Contents
//! - `averaging` - repeated-run averaging and the full resistance chain
//! - `prohaska` - form-factor estimate from low-speed averaged rows
//! - `statistics` - means, population standard deviations, least squares

pub mod averaging;
pub mod prohaska;
pub mod statistics;

pub use averaging::average_condition_runs;
pub use prohaska::{estimate_form_factor, ProhaskaFit};

use thiserror::Error;
use tracing::info;

use crate::config::{AnalysisConfig, RunGroup};
use crate::types::{AveragedRow, ConditionCode, HullConditionTable, ResultsRow};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No hull constants for condition {code} (run {run_number})")]
    UnknownCondition {
        code: ConditionCode,
        run_number: u32,
    },

    #[error("Insufficient data: need {needed}, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Degenerate fit: abscissa has no spread")]
    DegenerateFit,
}

/// Average several named run groups, keeping input order.
///
/// Stops at the first group that fails.
pub fn average_condition_groups(
    groups: &[RunGroup],
    table: &[ResultsRow],
    hulls: &HullConditionTable,
    config: &AnalysisConfig,
) -> Result<Vec<(String, Vec<AveragedRow>)>, AnalysisError> {
    groups
        .iter()
        .map(|g| {
            info!(group = %g.name, runs = g.runs.len(), "Averaging run group");
            average_condition_runs(&g.runs, table, hulls, config).map(|rows| (g.name.clone(), rows))
        })
        .collect()
}
