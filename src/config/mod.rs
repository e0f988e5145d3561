//! Analysis Configuration Module
//!
//! Campaign constants loaded from TOML, replacing hardcoded tank and ship
//! particulars with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the command line
//! 2. `DEMIHULL_CONFIG` environment variable (path to TOML file)
//! 3. `resistance_config.toml` in the current working directory
//! 4. Built-in campaign defaults
//!
//! The loaded `AnalysisConfig` is passed by reference into the analysis;
//! there is no process-wide instance.

mod analysis_config;
pub mod defaults;
pub mod validation;

pub use analysis_config::*;
