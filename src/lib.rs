//! demihull-resistance: towing-tank resistance analysis for a catamaran demihull
//!
//! Averages repeated runs of each experimental condition and extrapolates
//! the averaged model resistance to full scale.
//!
//! ## Architecture
//!
//! - **Types**: results-table rows, hull condition constants, averaged rows
//! - **Hydrodynamics**: closed-form friction lines, similarity laws, attitude
//! - **Analysis**: repeated-run averaging, Prohaska form-factor fit
//! - **Table**: results table reader, averaged table writers
//! - **Config**: campaign constants from TOML with built-in defaults

pub mod analysis;
pub mod config;
pub mod hydrodynamics;
pub mod table;
pub mod types;

// Re-export configuration
pub use config::{AnalysisConfig, ConfigError, RunGroup, UnknownConditionPolicy};

// Re-export commonly used types
pub use types::{
    AveragedRow, ConditionCode, FullScaleResults, HullConditionConstants, HullConditionTable,
    ModelScaleResults, RepeatSpread, ResultsRow,
};

// Re-export analysis entry points
pub use analysis::{
    average_condition_groups, average_condition_runs, estimate_form_factor, AnalysisError,
    ProhaskaFit,
};

// Re-export table I/O
pub use table::{read_results_table, write_averaged_tables, TableError};
