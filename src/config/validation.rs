//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::AnalysisConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for AnalysisConfig.
///
/// Entries of `[[hull_conditions]]` and `[[groups]]` are keyed without an
/// index, e.g. `hull_conditions.lwl_m`.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [campaign]
        "campaign",
        "campaign.name",
        "campaign.description",
        // [physics]
        "physics",
        "physics.gravity",
        "physics.freshwater_density",
        "physics.saltwater_density",
        "physics.model_kinematic_viscosity",
        "physics.full_scale_kinematic_viscosity",
        "physics.air_density",
        // [model]
        "model",
        "model.scale_ratio",
        "model.lvdt_post_spacing_mm",
        "model.form_factor",
        "model.propulsive_efficiency",
        "model.hull_roughness_m",
        "model.air_drag_coefficient",
        "model.frontal_area_m2",
        // [turbulence_stimulator]
        "turbulence_stimulator",
        "turbulence_stimulator.slope",
        "turbulence_stimulator.intercept",
        "turbulence_stimulator.condition_codes",
        // [analysis]
        "analysis",
        "analysis.unknown_condition",
        "analysis.prohaska_max_froude",
        // [output]
        "output",
        "output.directory",
        "output.file_stem",
        // [[hull_conditions]]
        "hull_conditions",
        "hull_conditions.code",
        "hull_conditions.label",
        "hull_conditions.lwl_m",
        "hull_conditions.wsa_m2",
        "hull_conditions.draft_m",
        "hull_conditions.block_coefficient",
        // [[groups]]
        "groups",
        "groups.name",
        "groups.runs",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`. Tables inside arrays share the array's prefix.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            match v {
                toml::Value::Table(_) => keys.extend(walk_toml_keys(v, &path)),
                toml::Value::Array(items) => {
                    for item in items.iter().filter(|i| i.is_table()) {
                        for nested in walk_toml_keys(item, &path) {
                            if !keys.contains(&nested) {
                                keys.push(nested);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties are broken alphabetically so the suggestion is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        best = match best {
            Some((bk, bd)) if bd < dist || (bd == dist && bk <= k) => Some((bk, bd)),
            _ => Some((k, dist)),
        };
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Does not fail on unknown keys; parse errors are reported by serde later.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };

    let known = known_config_keys();
    let found = walk_toml_keys(&value, "");
    let mut warnings = Vec::new();

    for key in &found {
        if !known.contains(key.as_str()) {
            let suggestion = suggest_correction(key, &known);
            let message = format!("Unknown config key '{key}'");
            warnings.push(ValidationWarning {
                field: key.clone(),
                message,
                suggestion,
            });
        }
    }

    warnings
}

// ============================================================================
// Physical Range Validation
// ============================================================================

fn range_warning(
    field: &str,
    value: f64,
    low: f64,
    high: f64,
    unit: &str,
) -> Option<ValidationWarning> {
    if value >= low && value <= high {
        return None;
    }
    Some(ValidationWarning {
        field: field.to_string(),
        message: format!("{field} = {value} is outside typical range ({low}-{high} {unit})"),
        suggestion: None,
    })
}

/// Validate physical ranges on a parsed AnalysisConfig.
///
/// Returns (errors, warnings). Errors are impossible values; warnings are
/// values a towing tank would not normally see.
pub fn validate_physical_ranges(config: &AnalysisConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let p = &config.physics;
    let m = &config.model;

    // A model larger than its ship cannot be extrapolated
    if m.scale_ratio < 1.0 {
        errors.push(format!(
            "model.scale_ratio = {} must be >= 1 (full scale / model)",
            m.scale_ratio
        ));
    }

    if p.saltwater_density < p.freshwater_density {
        warnings.push(ValidationWarning {
            field: "physics.saltwater_density".to_string(),
            message: format!(
                "physics.saltwater_density = {} is below freshwater_density = {}",
                p.saltwater_density, p.freshwater_density
            ),
            suggestion: None,
        });
    }

    let checks = [
        range_warning("physics.gravity", p.gravity, 9.78, 9.84, "m/s²"),
        range_warning("physics.freshwater_density", p.freshwater_density, 990.0, 1005.0, "kg/m³"),
        range_warning("physics.saltwater_density", p.saltwater_density, 1015.0, 1035.0, "kg/m³"),
        range_warning(
            "physics.model_kinematic_viscosity",
            p.model_kinematic_viscosity,
            0.8e-6,
            1.6e-6,
            "m²/s",
        ),
        range_warning(
            "physics.full_scale_kinematic_viscosity",
            p.full_scale_kinematic_viscosity,
            0.8e-6,
            1.9e-6,
            "m²/s",
        ),
        range_warning("physics.air_density", p.air_density, 1.1, 1.35, "kg/m³"),
        range_warning("model.form_factor", m.form_factor, 1.0, 1.6, ""),
        range_warning("model.hull_roughness_m", m.hull_roughness_m, 0.0, 1.0e-3, "m"),
    ];
    warnings.extend(checks.into_iter().flatten());

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("viscosty", "viscosity"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [model]
            scale_ratio = 21.6
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"model".to_string()));
        assert!(keys.contains(&"model.scale_ratio".to_string()));
    }

    #[test]
    fn test_walk_toml_keys_array_of_tables() {
        let toml: toml::Value = r#"
            [[groups]]
            name = "a"
            runs = [1]

            [[groups]]
            name = "b"
            runs = [2]
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert_eq!(keys.iter().filter(|k| *k == "groups.name").count(), 1);
        assert!(keys.contains(&"groups.runs".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[physics]
freshwater_densty = 1000.0
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("freshwater_densty"));
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("physics.freshwater_density")
        );
    }

    #[test]
    fn test_typo_inside_hull_condition_entry() {
        let toml_str = r#"
[[hull_conditions]]
code = 7
lwl = 4.3
wsa_m2 = 1.5
draft_m = 0.13
block_coefficient = 0.46
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "hull_conditions.lwl");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("hull_conditions.lwl_m"));
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
[campaign]
name = "Demihull"

[model]
scale_ratio = 21.6
form_factor = 1.18

[analysis]
unknown_condition = "skip"

[[groups]]
name = "Cond. 7"
runs = [81, 82]
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {:?}", warnings);
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        let suggestion = suggest_correction("completely_unrelated_garbage_key_xyz", &known);
        assert!(suggestion.is_none());
    }

    #[test]
    fn test_physical_range_defaults_clean() {
        let config = AnalysisConfig::default();
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty(), "Defaults should produce no errors: {:?}", errors);
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {:?}", warnings);
    }

    #[test]
    fn test_scale_ratio_below_one_is_error() {
        let mut config = AnalysisConfig::default();
        config.model.scale_ratio = 0.5;
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("scale_ratio")));
    }

    #[test]
    fn test_seawater_lighter_than_tank_water_warns() {
        let mut config = AnalysisConfig::default();
        config.physics.saltwater_density = 998.0;
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "physics.saltwater_density"));
    }
}
