//! Campaign default constants.
//!
//! Centralises the physical constants and model particulars of the test
//! campaign. Every value here can be overridden in `resistance_config.toml`.

use crate::types::HullConditionConstants;

// ============================================================================
// Physical constants
// ============================================================================

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.806;

/// Tank fresh water density (kg/m³).
pub const FRESHWATER_DENSITY: f64 = 1000.0;

/// Sea water density for full-scale extrapolation (kg/m³).
pub const SALTWATER_DENSITY: f64 = 1025.0;

/// Tank fresh water kinematic viscosity at ~20 °C (m²/s).
pub const MODEL_KINEMATIC_VISCOSITY: f64 = 1.0034e-6;

/// Sea water kinematic viscosity at 15 °C (m²/s).
pub const FULL_SCALE_KINEMATIC_VISCOSITY: f64 = 1.1892e-6;

/// Air density (kg/m³).
pub const AIR_DENSITY: f64 = 1.225;

// ============================================================================
// Model particulars
// ============================================================================

/// Model scale ratio λ (full scale / model).
pub const SCALE_RATIO: f64 = 21.6;

/// Distance between the forward and aft LVDT posts (mm).
pub const LVDT_POST_SPACING_MM: f64 = 1150.0;

/// Form factor (1+k).
pub const FORM_FACTOR: f64 = 1.18;

/// Overall propulsive efficiency used for brake power.
pub const PROPULSIVE_EFFICIENCY: f64 = 0.5;

/// Hull roughness height for the ITTC 1978 allowance (m).
pub const HULL_ROUGHNESS_M: f64 = 150.0e-6;

/// Air drag coefficient of the superstructure.
pub const AIR_DRAG_COEFFICIENT: f64 = 0.8;

/// Full-scale projected frontal area above the waterline, per demihull (m²).
pub const FRONTAL_AREA_M2: f64 = 245.0;

// ============================================================================
// Turbulence stimulators
// ============================================================================

/// Slope of the fitted turbulence-stimulator drag line (N per unit Fr).
pub const TS_SLOPE: f64 = 3.1638;

/// Intercept of the fitted turbulence-stimulator drag line (N).
pub const TS_INTERCEPT: f64 = -0.4031;

/// Conditions run with turbulence stimulators whose drag is corrected.
pub const TS_CONDITION_CODES: std::ops::RangeInclusive<u8> = 4..=12;

// ============================================================================
// Analysis
// ============================================================================

/// Upper Froude number for points used in the Prohaska fit.
pub const PROHASKA_MAX_FROUDE: f64 = 0.2;

/// Default stem of the averaged output files.
pub const OUTPUT_FILE_STEM: &str = "resultsAveragedArray";

// ============================================================================
// Hull conditions
// ============================================================================

fn condition(
    code: u8,
    label: &str,
    lwl_m: f64,
    wsa_m2: f64,
    draft_m: f64,
    block_coefficient: f64,
) -> HullConditionConstants {
    HullConditionConstants {
        code,
        label: label.to_string(),
        lwl_m,
        wsa_m2,
        draft_m,
        block_coefficient,
    }
}

/// Model-scale geometry for conditions 1-13.
pub fn campaign_hull_conditions() -> Vec<HullConditionConstants> {
    // 1,500 t displacement, level static trim
    let (l15, s15, t15, cb15) = (4.30, 1.501, 0.133, 0.4639);
    vec![
        condition(1, "1,500t, bare hull", l15, s15, t15, cb15),
        condition(2, "1,500t, 1st row turbulence studs", l15, s15, t15, cb15),
        condition(3, "1,500t, 1st and 2nd row turbulence studs", l15, s15, t15, cb15),
        condition(4, "1,500t, trim tab 0 deg", l15, s15, t15, cb15),
        condition(5, "1,500t, trim tab 5 deg", l15, s15, t15, cb15),
        condition(6, "1,500t, trim tab 10 deg", l15, s15, t15, cb15),
        condition(7, "1,500t, level static trim", l15, s15, t15, cb15),
        condition(8, "1,500t, -0.5 deg by bow", 4.33, 1.500, 0.138, 0.4461),
        condition(9, "1,500t, 0.5 deg by stern", 4.22, 1.492, 0.131, 0.4438),
        condition(10, "1,804t, level static trim", 4.22, 1.680, 0.153, 0.4875),
        condition(11, "1,804t, -0.5 deg by bow", 4.25, 1.680, 0.156, 0.4671),
        condition(12, "1,804t, 0.5 deg by stern", 4.17, 1.670, 0.150, 0.4629),
        condition(13, "1,500t, deep transom, Prohaska runs", l15, s15, t15, cb15),
    ]
}
