//! Analysis Configuration - campaign constants as operator-tunable TOML values
//!
//! Every constant the averaging pipeline uses is a field in this module.
//! Each struct implements `Default` with the campaign values from
//! `defaults.rs`, so an empty or missing config file reproduces the
//! published analysis exactly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::types::{ConditionCode, HullConditionConstants, HullConditionTable};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "DEMIHULL_CONFIG";

/// Config file looked up in the current working directory.
pub const LOCAL_CONFIG_FILE: &str = "resistance_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one test campaign.
///
/// Load with `AnalysisConfig::load()` which searches:
/// 1. `$DEMIHULL_CONFIG` env var
/// 2. `./resistance_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Campaign identification
    #[serde(default)]
    pub campaign: CampaignInfo,

    /// Fluid properties and gravity
    #[serde(default)]
    pub physics: PhysicsConfig,

    /// Model particulars and extrapolation constants
    #[serde(default)]
    pub model: ModelConfig,

    /// Turbulence-stimulator drag correction
    #[serde(default)]
    pub turbulence_stimulator: TurbulenceStimulatorConfig,

    /// Averaging behaviour
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Output files
    #[serde(default)]
    pub output: OutputConfig,

    /// Hull geometry per condition code; replaces the built-in table when set
    #[serde(default = "defaults::campaign_hull_conditions")]
    pub hull_conditions: Vec<HullConditionConstants>,

    /// Named repeat-run groups
    #[serde(default)]
    pub groups: Vec<RunGroup>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            campaign: CampaignInfo::default(),
            physics: PhysicsConfig::default(),
            model: ModelConfig::default(),
            turbulence_stimulator: TurbulenceStimulatorConfig::default(),
            analysis: AnalysisSettings::default(),
            output: OutputConfig::default(),
            hull_conditions: defaults::campaign_hull_conditions(),
            groups: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration using the standard search order:
    /// 1. `$DEMIHULL_CONFIG` environment variable
    /// 2. `./resistance_config.toml` in the current working directory
    /// 3. Built-in defaults (campaign constants)
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(
                            path = %p.display(),
                            campaign = %config.campaign.name,
                            "Loaded config from {}",
                            CONFIG_ENV_VAR
                        );
                        return config;
                    }
                    Err(e) => {
                        warn!(
                            path = %p.display(),
                            error = %e,
                            "Failed to load config from {}, falling back",
                            CONFIG_ENV_VAR
                        );
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(
                        campaign = %config.campaign.name,
                        "Loaded config from ./{}",
                        LOCAL_CONFIG_FILE
                    );
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No {} found, using built-in campaign defaults", LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document. Unknown keys are logged as
    /// warnings and otherwise ignored.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Analysis config saved");
        Ok(())
    }

    /// Build the immutable condition lookup from `hull_conditions`.
    pub fn hull_table(&self) -> HullConditionTable {
        HullConditionTable::new(self.hull_conditions.iter().cloned())
    }

    /// Find a named run group.
    pub fn group(&self, name: &str) -> Option<&RunGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Validate all constants for physical consistency.
    ///
    /// Rules:
    /// - Densities, viscosities, gravity, lengths and areas must be finite and > 0
    /// - Propulsive efficiency must lie in (0, 1]
    /// - Form factor must be >= 1
    /// - Hull condition codes must be unique and within 1-13
    /// - Run groups must be named and non-empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let p = &self.physics;
        Self::check_positive(p.gravity, "physics.gravity", &mut errors);
        Self::check_positive(p.freshwater_density, "physics.freshwater_density", &mut errors);
        Self::check_positive(p.saltwater_density, "physics.saltwater_density", &mut errors);
        Self::check_positive(
            p.model_kinematic_viscosity,
            "physics.model_kinematic_viscosity",
            &mut errors,
        );
        Self::check_positive(
            p.full_scale_kinematic_viscosity,
            "physics.full_scale_kinematic_viscosity",
            &mut errors,
        );
        Self::check_positive(p.air_density, "physics.air_density", &mut errors);

        let m = &self.model;
        Self::check_positive(m.scale_ratio, "model.scale_ratio", &mut errors);
        Self::check_positive(m.lvdt_post_spacing_mm, "model.lvdt_post_spacing_mm", &mut errors);
        Self::check_positive(m.hull_roughness_m, "model.hull_roughness_m", &mut errors);
        Self::check_non_negative(m.air_drag_coefficient, "model.air_drag_coefficient", &mut errors);
        Self::check_non_negative(m.frontal_area_m2, "model.frontal_area_m2", &mut errors);

        if !m.propulsive_efficiency.is_finite()
            || m.propulsive_efficiency <= 0.0
            || m.propulsive_efficiency > 1.0
        {
            errors.push(format!(
                "model.propulsive_efficiency ({}) must be in (0, 1]",
                m.propulsive_efficiency
            ));
        }
        if !m.form_factor.is_finite() || m.form_factor < 1.0 {
            errors.push(format!("model.form_factor ({}) must be >= 1.0", m.form_factor));
        }

        let ts = &self.turbulence_stimulator;
        if !ts.slope.is_finite() || !ts.intercept.is_finite() {
            errors.push("turbulence_stimulator slope and intercept must be finite".to_string());
        }

        let max_froude = self.analysis.prohaska_max_froude;
        if !max_froude.is_finite() || max_froude <= 0.0 {
            errors.push(format!(
                "analysis.prohaska_max_froude ({}) must be > 0",
                self.analysis.prohaska_max_froude
            ));
        }

        if self.hull_conditions.is_empty() {
            errors.push("hull_conditions must define at least one condition".to_string());
        }
        let mut seen: Vec<ConditionCode> = Vec::new();
        for hc in &self.hull_conditions {
            if !(1..=13).contains(&hc.code) {
                errors.push(format!("hull_conditions: code {} is outside 1-13", hc.code));
            }
            if seen.contains(&hc.code) {
                errors.push(format!("hull_conditions: code {} defined more than once", hc.code));
            }
            seen.push(hc.code);
            let name = format!("hull_conditions[{}]", hc.code);
            Self::check_positive(hc.lwl_m, &format!("{name}.lwl_m"), &mut errors);
            Self::check_positive(hc.wsa_m2, &format!("{name}.wsa_m2"), &mut errors);
            Self::check_positive(hc.draft_m, &format!("{name}.draft_m"), &mut errors);
            if !(0.0..=1.0).contains(&hc.block_coefficient) {
                errors.push(format!(
                    "{name}.block_coefficient ({}) must be within 0-1",
                    hc.block_coefficient
                ));
            }
        }

        for g in &self.groups {
            if g.name.trim().is_empty() {
                errors.push("groups: every group needs a name".to_string());
            }
            if g.runs.is_empty() {
                errors.push(format!("groups '{}': runs must not be empty", g.name));
            }
        }

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_positive(value: f64, name: &str, errors: &mut Vec<String>) {
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("{name} ({value}) must be a finite number > 0"));
        }
    }

    fn check_non_negative(value: f64, name: &str, errors: &mut Vec<String>) {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!("{name} ({value}) must be a finite number >= 0"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            Self::Parse(path, e) => write!(f, "Config parse error ({}): {}", path.display(), e),
            Self::Serialize(e) => write!(f, "Config serialization error: {e}"),
            Self::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Campaign Info
// ============================================================================

/// Identification metadata, appears in logs only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignInfo {
    #[serde(default = "default_campaign_name")]
    pub name: String,

    #[serde(default)]
    pub description: String,
}

fn default_campaign_name() -> String {
    "DEFAULT".to_string()
}

impl Default for CampaignInfo {
    fn default() -> Self {
        Self {
            name: default_campaign_name(),
            description: String::new(),
        }
    }
}

// ============================================================================
// Physics
// ============================================================================

/// Fluid properties for model (tank) and full scale (sea).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravitational acceleration (m/s²)
    #[serde(default = "default_gravity")]
    pub gravity: f64,

    /// Tank water density (kg/m³)
    #[serde(default = "default_freshwater_density")]
    pub freshwater_density: f64,

    /// Sea water density (kg/m³)
    #[serde(default = "default_saltwater_density")]
    pub saltwater_density: f64,

    /// Tank water kinematic viscosity (m²/s)
    #[serde(default = "default_model_viscosity")]
    pub model_kinematic_viscosity: f64,

    /// Sea water kinematic viscosity (m²/s)
    #[serde(default = "default_full_scale_viscosity")]
    pub full_scale_kinematic_viscosity: f64,

    /// Air density (kg/m³)
    #[serde(default = "default_air_density")]
    pub air_density: f64,
}

fn default_gravity() -> f64 { defaults::GRAVITY }
fn default_freshwater_density() -> f64 { defaults::FRESHWATER_DENSITY }
fn default_saltwater_density() -> f64 { defaults::SALTWATER_DENSITY }
fn default_model_viscosity() -> f64 { defaults::MODEL_KINEMATIC_VISCOSITY }
fn default_full_scale_viscosity() -> f64 { defaults::FULL_SCALE_KINEMATIC_VISCOSITY }
fn default_air_density() -> f64 { defaults::AIR_DENSITY }

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            freshwater_density: default_freshwater_density(),
            saltwater_density: default_saltwater_density(),
            model_kinematic_viscosity: default_model_viscosity(),
            full_scale_kinematic_viscosity: default_full_scale_viscosity(),
            air_density: default_air_density(),
        }
    }
}

// ============================================================================
// Model Particulars
// ============================================================================

/// Model particulars and full-scale extrapolation constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Scale ratio λ
    #[serde(default = "default_scale_ratio")]
    pub scale_ratio: f64,

    /// Distance between the LVDT posts (mm)
    #[serde(default = "default_post_spacing")]
    pub lvdt_post_spacing_mm: f64,

    /// Form factor (1+k)
    #[serde(default = "default_form_factor")]
    pub form_factor: f64,

    /// Overall propulsive efficiency, Pb = Pe / η
    #[serde(default = "default_propulsive_efficiency")]
    pub propulsive_efficiency: f64,

    /// Hull roughness height ks (m)
    #[serde(default = "default_hull_roughness")]
    pub hull_roughness_m: f64,

    /// Superstructure air drag coefficient
    #[serde(default = "default_air_drag_coefficient")]
    pub air_drag_coefficient: f64,

    /// Full-scale frontal area above the waterline (m²)
    #[serde(default = "default_frontal_area")]
    pub frontal_area_m2: f64,
}

fn default_scale_ratio() -> f64 { defaults::SCALE_RATIO }
fn default_post_spacing() -> f64 { defaults::LVDT_POST_SPACING_MM }
fn default_form_factor() -> f64 { defaults::FORM_FACTOR }
fn default_propulsive_efficiency() -> f64 { defaults::PROPULSIVE_EFFICIENCY }
fn default_hull_roughness() -> f64 { defaults::HULL_ROUGHNESS_M }
fn default_air_drag_coefficient() -> f64 { defaults::AIR_DRAG_COEFFICIENT }
fn default_frontal_area() -> f64 { defaults::FRONTAL_AREA_M2 }

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            scale_ratio: default_scale_ratio(),
            lvdt_post_spacing_mm: default_post_spacing(),
            form_factor: default_form_factor(),
            propulsive_efficiency: default_propulsive_efficiency(),
            hull_roughness_m: default_hull_roughness(),
            air_drag_coefficient: default_air_drag_coefficient(),
            frontal_area_m2: default_frontal_area(),
        }
    }
}

// ============================================================================
// Turbulence Stimulators
// ============================================================================

/// Fitted stud drag line, TS = slope × Fr + intercept, and the conditions it applies to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurbulenceStimulatorConfig {
    #[serde(default = "default_ts_slope")]
    pub slope: f64,

    #[serde(default = "default_ts_intercept")]
    pub intercept: f64,

    /// Condition codes whose model resistance is corrected
    #[serde(default = "default_ts_codes")]
    pub condition_codes: Vec<ConditionCode>,
}

fn default_ts_slope() -> f64 { defaults::TS_SLOPE }
fn default_ts_intercept() -> f64 { defaults::TS_INTERCEPT }
fn default_ts_codes() -> Vec<ConditionCode> { defaults::TS_CONDITION_CODES.collect() }

impl TurbulenceStimulatorConfig {
    pub fn applies_to(&self, code: ConditionCode) -> bool {
        self.condition_codes.contains(&code)
    }
}

impl Default for TurbulenceStimulatorConfig {
    fn default() -> Self {
        Self {
            slope: default_ts_slope(),
            intercept: default_ts_intercept(),
            condition_codes: default_ts_codes(),
        }
    }
}

// ============================================================================
// Analysis Settings
// ============================================================================

/// What to do with a speed group whose condition code has no hull constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownConditionPolicy {
    /// Return `AnalysisError::UnknownCondition`
    #[default]
    Abort,
    /// Log the group at error level and leave it out of the result
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default)]
    pub unknown_condition: UnknownConditionPolicy,

    /// Highest Froude number used in the Prohaska fit
    #[serde(default = "default_prohaska_max_froude")]
    pub prohaska_max_froude: f64,
}

fn default_prohaska_max_froude() -> f64 { defaults::PROHASKA_MAX_FROUDE }

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            unknown_condition: UnknownConditionPolicy::default(),
            prohaska_max_froude: default_prohaska_max_froude(),
        }
    }
}

// ============================================================================
// Output
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the averaged tables are written to
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// File stem; `.dat` and `.txt` are appended
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}
fn default_file_stem() -> String {
    defaults::OUTPUT_FILE_STEM.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            file_stem: default_file_stem(),
        }
    }
}

// ============================================================================
// Run Groups
// ============================================================================

/// Runs repeated at the same nominal test points of one condition,
/// e.g. "Cond. 7: 1,500t level trim".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunGroup {
    pub name: String,
    pub runs: Vec<u32>,
}

/// Widest range a run list may expand, counted as `hi - lo`.
pub const MAX_RUN_RANGE: u32 = 10_000;

/// Parse a run list such as `81-90,95` into run numbers.
///
/// Ranges are inclusive and may be written high-to-low. Whitespace around
/// items is ignored; duplicates are kept in the order written. A range
/// spanning more than [`MAX_RUN_RANGE`] runs is rejected.
pub fn parse_run_list(list: &str) -> Result<Vec<u32>, String> {
    let mut runs = Vec::new();
    for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let parse = |s: &str| {
            s.trim()
                .parse::<u32>()
                .map_err(|_| format!("'{s}' is not a run number"))
        };
        match item.split_once('-') {
            Some((lo, hi)) => {
                let (lo, hi) = (parse(lo)?, parse(hi)?);
                if lo.abs_diff(hi) > MAX_RUN_RANGE {
                    return Err(format!(
                        "range '{item}' spans more than {MAX_RUN_RANGE} runs"
                    ));
                }
                if lo <= hi {
                    runs.extend(lo..=hi);
                } else {
                    runs.extend((hi..=lo).rev());
                }
            }
            None => runs.push(parse(item)?),
        }
    }
    if runs.is_empty() {
        return Err("run list is empty".to_string());
    }
    Ok(runs)
}

// ============================================================================
// Tests
// ============================================================================
