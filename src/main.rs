//! demihull-resistance - repeated-run averaging for towing-tank resistance tests
//!
//! # Usage
//!
//! ```bash
//! # Average one condition and write resultsAveragedArray.{dat,txt}
//! demihull-resistance average --table full_resistance_data.dat --runs 81-90 --name "Cond. 7"
//!
//! # Average every [[groups]] entry of the config file
//! demihull-resistance --config resistance_config.toml average --table full_resistance_data.dat
//!
//! # Form factor from the Prohaska runs
//! demihull-resistance prohaska --table full_resistance_data.dat --runs 1-15
//! ```
//!
//! # Environment Variables
//!
//! - `DEMIHULL_CONFIG`: Path to the analysis config (default: ./resistance_config.toml)
//! - `RUST_LOG`: Logging level (default: info)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use demihull_resistance::analysis::{average_condition_groups, estimate_form_factor};
use demihull_resistance::config::{parse_run_list, AnalysisConfig, RunGroup};
use demihull_resistance::table::{read_results_table, write_averaged_tables};
use demihull_resistance::types::AveragedRow;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "demihull-resistance")]
#[command(about = "Catamaran demihull towing-tank resistance analysis")]
#[command(version)]
struct CliArgs {
    /// Analysis config file (overrides DEMIHULL_CONFIG and ./resistance_config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Average repeated runs per speed and extrapolate to full scale
    Average {
        /// Results table (comma-separated, one run per line)
        #[arg(long)]
        table: PathBuf,

        /// Repeat-run list, e.g. "81-90,95". May be given once per group.
        /// Without it the [[groups]] of the config are used.
        #[arg(long, value_name = "LIST")]
        runs: Vec<String>,

        /// Group label, paired with --runs in order
        #[arg(long)]
        name: Vec<String>,

        /// Directory for the averaged tables (default from config)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Estimate the form factor (1+k) with the Prohaska method
    Prohaska {
        /// Results table (comma-separated, one run per line)
        #[arg(long)]
        table: PathBuf,

        /// Low-speed run list, e.g. "1-15"
        #[arg(long, value_name = "LIST")]
        runs: String,

        /// Highest Froude number used in the fit (default from config)
        #[arg(long)]
        max_froude: Option<f64>,
    },

    /// Print the effective configuration as TOML
    ShowConfig,
}

// ============================================================================
// Commands
// ============================================================================

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(p) => AnalysisConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(AnalysisConfig::load()),
    }
}

fn build_groups(
    runs: &[String],
    names: &[String],
    config: &AnalysisConfig,
) -> Result<Vec<RunGroup>> {
    if runs.is_empty() {
        if config.groups.is_empty() {
            anyhow::bail!("No --runs given and no [[groups]] in config");
        }
        return Ok(config.groups.clone());
    }
    if names.len() > runs.len() {
        warn!(
            names = names.len(),
            runs = runs.len(),
            "More --name than --runs, extra names ignored"
        );
    }

    runs.iter()
        .enumerate()
        .map(|(i, list)| {
            let parsed = parse_run_list(list)
                .map_err(|e| anyhow::anyhow!(e))
                .with_context(|| format!("Invalid run list '{list}'"))?;
            let name = names.get(i).cloned().unwrap_or_else(|| format!("runs {list}"));
            Ok(RunGroup { name, runs: parsed })
        })
        .collect()
}

fn print_group(name: &str, rows: &[AveragedRow]) {
    println!("{name}");
    println!(
        "  {:>3} {:>4} {:>7} {:>6} {:>8} {:>8} {:>8} {:>10} {:>10}",
        "n", "cond", "V [m/s]", "Fr", "CTm", "Cr", "CTs", "Rts [kN]", "Pb [kW]"
    );
    for r in rows {
        println!(
            "  {:>3} {:>4} {:>7.3} {:>6.2} {:>8.5} {:>8.5} {:>8.5} {:>10.1} {:>10.1}",
            r.repeats,
            r.condition,
            r.speed,
            r.froude_number,
            r.model.resistance_coeff,
            r.model.residual_coeff,
            r.full_scale.resistance_coeff,
            r.full_scale.total_resistance / 1000.0,
            r.full_scale.brake_power / 1000.0,
        );
    }
}

fn run_average(
    config: &AnalysisConfig,
    table: &Path,
    runs: &[String],
    names: &[String],
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let groups = build_groups(runs, names, config)?;
    let rows = read_results_table(table)
        .with_context(|| format!("Failed to read results table {}", table.display()))?;
    let hulls = config.hull_table();

    let results = average_condition_groups(&groups, &rows, &hulls, config)?;

    let mut all_rows = Vec::new();
    for (name, group_rows) in &results {
        print_group(name, group_rows);
        all_rows.extend(group_rows.iter().cloned());
    }

    let directory = output_dir.unwrap_or_else(|| config.output.directory.clone());
    let (dat, txt) = write_averaged_tables(&directory, &config.output.file_stem, &all_rows)
        .context("Failed to write averaged tables")?;
    info!(dat = %dat.display(), txt = %txt.display(), "Done");
    Ok(())
}

fn run_prohaska(
    config: &AnalysisConfig,
    table: &Path,
    runs: &str,
    max_froude: Option<f64>,
) -> Result<()> {
    let runs = parse_run_list(runs)
        .map_err(|e| anyhow::anyhow!(e))
        .with_context(|| format!("Invalid run list '{runs}'"))?;
    let rows = read_results_table(table)
        .with_context(|| format!("Failed to read results table {}", table.display()))?;
    let hulls = config.hull_table();

    let averaged = demihull_resistance::average_condition_runs(&runs, &rows, &hulls, config)?;
    let max_froude = max_froude.unwrap_or(config.analysis.prohaska_max_froude);
    let fit = estimate_form_factor(&averaged, max_froude)?;

    println!("Prohaska fit (Fr <= {max_froude})");
    println!("  points     {}", fit.points);
    println!("  (1+k)      {:.4}", fit.form_factor);
    println!("  slope c    {:.4}", fit.slope);
    println!("  R²         {:.4}", fit.r_squared);
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    let config = load_config(args.config.as_deref())?;
    info!(
        campaign = %config.campaign.name,
        conditions = config.hull_conditions.len(),
        "Analysis config ready"
    );

    match args.command {
        SubCommand::Average {
            table,
            runs,
            name,
            output_dir,
        } => run_average(&config, &table, &runs, &name, output_dir),
        SubCommand::Prohaska {
            table,
            runs,
            max_froude,
        } => run_prohaska(&config, &table, &runs, max_froude),
        SubCommand::ShowConfig => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
