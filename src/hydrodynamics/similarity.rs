//! Similarity laws and model-to-full-scale conversion

/// Metres per second to knots
pub const MS_TO_KNOTS: f64 = 3600.0 / 1852.0;

/// Round half away from zero to `decimals` places.
///
/// The scaled value is first snapped to 6 decimals so that decimal inputs
/// whose binary form sits just below the half-way point (2.345 is stored as
/// 2.34499999...) still round up, matching hand calculation.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    let snapped = if scaled.abs() < 1.0e9 {
        (scaled * 1.0e6).round() / 1.0e6
    } else {
        scaled
    };
    snapped.round() / factor
}

/// Froude length number as recorded in the averaged table
///
/// Formula: Fr = round₂( round₂(V) / √(g × LWL) )
///
/// Speed is rounded to two decimals before dividing, then the ratio is
/// rounded again, so repeated runs at the same nominal speed share one value.
pub fn froude_number(speed: f64, lwl: f64, gravity: f64) -> f64 {
    if lwl <= 0.0 || gravity <= 0.0 {
        return 0.0;
    }
    round_to(round_to(speed, 2) / (gravity * lwl).sqrt(), 2)
}

/// Reynolds number: Re = V × L / ν
pub fn reynolds_number(speed: f64, length: f64, kinematic_viscosity: f64) -> f64 {
    if kinematic_viscosity <= 0.0 {
        return 0.0;
    }
    speed * length / kinematic_viscosity
}

/// Full-scale speed under Froude similarity: V_s = V_m × √λ
pub fn full_scale_speed(model_speed: f64, scale_ratio: f64) -> f64 {
    model_speed * scale_ratio.sqrt()
}

/// Convert a drag reading in grams-force to Newtons.
pub fn drag_to_newtons(drag_grams: f64, gravity: f64) -> f64 {
    (drag_grams / 1000.0) * gravity
}

/// Resistance coefficient: C = R / (½ ρ S V²)
///
/// Returns 0.0 when the dynamic pressure term vanishes (zero speed).
pub fn resistance_coefficient(resistance: f64, density: f64, wetted_area: f64, speed: f64) -> f64 {
    let dynamic = 0.5 * density * wetted_area * speed.powi(2);
    if dynamic <= 0.0 {
        return 0.0;
    }
    resistance / dynamic
}

/// Resistance from a coefficient: R = ½ ρ V² S C
pub fn resistance_from_coefficient(
    coefficient: f64,
    density: f64,
    wetted_area: f64,
    speed: f64,
) -> f64 {
    0.5 * density * speed.powi(2) * wetted_area * coefficient
}

/// Effective (towing) power: Pe = V × R
pub fn effective_power(speed: f64, resistance: f64) -> f64 {
    speed * resistance
}

/// Brake power estimate: Pb = Pe / η
pub fn brake_power(effective_power: f64, propulsive_efficiency: f64) -> f64 {
    if propulsive_efficiency <= 0.0 {
        return 0.0;
    }
    effective_power / propulsive_efficiency
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_half_up_on_binary_edge() {
        assert_eq!(round_to(2.345, 2), 2.35);
        assert_eq!(round_to(1.005, 2), 1.01);
        assert_eq!(round_to(2.344, 2), 2.34);
        assert_eq!(round_to(-2.345, 2), -2.35);
    }

    #[test]
    fn test_froude_rounds_speed_then_ratio() {
        let g: f64 = 9.806;
        let lwl: f64 = 4.30;
        let two_step = round_to(2.35 / (g * lwl).sqrt(), 2);
        assert_eq!(froude_number(2.345, lwl, g), two_step);
        assert_eq!(froude_number(2.345, lwl, g), 0.36);
        // Idempotent with respect to an already-rounded speed
        assert_eq!(froude_number(2.35, lwl, g), froude_number(2.345, lwl, g));
    }

    #[test]
    fn test_froude_invalid_length() {
        assert_eq!(froude_number(1.0, 0.0, 9.806), 0.0);
    }

    #[test]
    fn test_reynolds_number() {
        let re = reynolds_number(1.5, 4.3, 1.0e-6);
        assert!((re - 6.45e6).abs() < 1e-3);
        assert_eq!(reynolds_number(1.5, 4.3, 0.0), 0.0);
    }

    #[test]
    fn test_full_scale_speed() {
        let vs = full_scale_speed(1.0, 21.6);
        assert!((vs - 21.6f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_resistance_coefficient_roundtrip() {
        let c = resistance_coefficient(10.0, 1000.0, 1.5, 2.0);
        assert!((c - 10.0 / 3000.0).abs() < 1e-15);
        let r = resistance_from_coefficient(c, 1000.0, 1.5, 2.0);
        assert!((r - 10.0).abs() < 1e-12);
        assert_eq!(resistance_coefficient(10.0, 1000.0, 1.5, 0.0), 0.0);
    }

    #[test]
    fn test_power() {
        let pe = effective_power(2.0, 50.0);
        assert_eq!(pe, 100.0);
        assert_eq!(brake_power(pe, 0.5), 200.0);
        assert_eq!(brake_power(pe, 0.0), 0.0);
    }

    #[test]
    fn test_drag_to_newtons() {
        assert!((drag_to_newtons(1000.0, 9.806) - 9.806).abs() < 1e-12);
    }
}
