//! Running attitude from the bow and stern LVDTs

/// Heave at mid-post: mean of the forward and aft LVDT readings (mm).
pub fn heave(fwd_lvdt: f64, aft_lvdt: f64) -> f64 {
    (fwd_lvdt + aft_lvdt) / 2.0
}

/// Dynamic trim angle in degrees
///
/// Formula: θ = atan((fwd − aft) / spacing)
///
/// `post_spacing_mm` is the longitudinal distance between the two LVDT
/// posts, in the same unit as the readings.
pub fn trim_degrees(fwd_lvdt: f64, aft_lvdt: f64, post_spacing_mm: f64) -> f64 {
    if post_spacing_mm <= 0.0 {
        return 0.0;
    }
    ((fwd_lvdt - aft_lvdt) / post_spacing_mm).atan().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heave_literal() {
        assert_eq!(heave(10.0, 6.0), 8.0);
    }

    #[test]
    fn test_trim_literal() {
        let trim = trim_degrees(10.0, 6.0, 1150.0);
        let expected = (4.0f64 / 1150.0).atan().to_degrees();
        assert!((trim - expected).abs() < 1e-12);
        assert!((trim - 0.1993).abs() < 1e-3, "got {trim}");
    }

    #[test]
    fn test_trim_sign_follows_bow_down() {
        assert!(trim_degrees(6.0, 10.0, 1150.0) < 0.0);
        assert_eq!(trim_degrees(5.0, 5.0, 1150.0), 0.0);
    }
}
