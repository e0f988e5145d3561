//! Frictional resistance correlations and full-scale allowances
//!
//! - ITTC'57 model-ship correlation line
//! - Grigson's flat-plate friction formula
//! - ITTC 1978 roughness allowance
//! - Correlation allowance
//! - Air resistance coefficient

/// Reynolds number at which Grigson's formula switches polynomial branch.
pub const GRIGSON_BRANCH_REYNOLDS: f64 = 1.0e7;

/// ITTC'57 frictional resistance coefficient
///
/// Formula: CF = 0.075 / (log₁₀(Re) − 2)²
///
/// Returns 0.0 for Reynolds numbers where the line is undefined (Re ≤ 100).
pub fn cf_ittc57(reynolds: f64) -> f64 {
    if !reynolds.is_finite() || reynolds <= 100.0 {
        return 0.0;
    }
    0.075 / (reynolds.log10() - 2.0).powi(2)
}

/// Grigson frictional resistance coefficient
///
/// With x = log₁₀(log₁₀(Re)):
/// - Re < 1e7:  log₁₀ CF = 2.98651 − 10.8843·x + 5.15283·x²
/// - Re ≥ 1e7:  log₁₀ CF = −9.57459 + 26.6084·x − 30.8285·x² + 10.8914·x³
///
/// Returns 0.0 for Re ≤ 10 (log-log undefined).
pub fn cf_grigson(reynolds: f64) -> f64 {
    if !reynolds.is_finite() || reynolds <= 10.0 {
        return 0.0;
    }

    let x = reynolds.log10().log10();
    let log_cf = if reynolds < GRIGSON_BRANCH_REYNOLDS {
        2.98651 - 10.8843 * x + 5.15283 * x.powi(2)
    } else {
        -9.57459 + 26.6084 * x - 30.8285 * x.powi(2) + 10.8914 * x.powi(3)
    };
    10f64.powf(log_cf)
}

/// ITTC 1978 roughness allowance
///
/// Formula: ΔCF = (105 × (ks / LWL)^(1/3) − 0.64) × 10⁻³
///
/// Where:
/// - ks = hull roughness height (m), 150 µm for a new hull
/// - LWL = full-scale waterline length (m)
pub fn roughness_allowance(roughness_m: f64, full_scale_lwl: f64) -> f64 {
    if full_scale_lwl <= 0.0 {
        return 0.0;
    }
    (105.0 * (roughness_m / full_scale_lwl).cbrt() - 0.64) * 1.0e-3
}

/// Correlation allowance
///
/// Formula: CA = (5.68 − 0.6 × log₁₀(Re)) × 10⁻³
pub fn correlation_allowance(full_scale_reynolds: f64) -> f64 {
    if full_scale_reynolds <= 0.0 {
        return 0.0;
    }
    (5.68 - 0.6 * full_scale_reynolds.log10()) * 1.0e-3
}

/// Air resistance coefficient, referred to the full-scale wetted area
///
/// Formula: CAA = CDA × (ρ_air × A_T) / (ρ_sw × S)
///
/// Where:
/// - CDA = air drag coefficient of the superstructure
/// - A_T = projected frontal area above the waterline (m²)
/// - S = full-scale wetted surface area (m²)
pub fn air_resistance_coeff(
    air_drag_coefficient: f64,
    air_density: f64,
    frontal_area: f64,
    water_density: f64,
    wetted_surface_area: f64,
) -> f64 {
    if water_density <= 0.0 || wetted_surface_area <= 0.0 {
        return 0.0;
    }
    air_drag_coefficient * (air_density * frontal_area) / (water_density * wetted_surface_area)
}
