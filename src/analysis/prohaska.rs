//! Prohaska form-factor estimate
//!
//! At low speed the wave resistance grows roughly with Fr⁴, so
//!
//!   CTm / CF = (1 + k) + c × Fr⁴ / CF
//!
//! is a straight line whose intercept is the form factor. CF is the
//! ITTC'57 model value.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::statistics::linear_regression;
use super::AnalysisError;
use crate::types::AveragedRow;

/// Fewest low-speed points accepted for a fit.
pub const MIN_PROHASKA_POINTS: usize = 3;

/// Result of a Prohaska fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProhaskaFit {
    /// Intercept, (1 + k)
    pub form_factor: f64,
    /// Slope c of the Fr⁴/CF term
    pub slope: f64,
    pub r_squared: f64,
    /// Number of averaged rows used
    pub points: usize,
}

/// Estimate (1 + k) from averaged rows with `Fr ≤ max_froude`.
///
/// Rows with a non-positive CF or CTm are ignored.
pub fn estimate_form_factor(
    rows: &[AveragedRow],
    max_froude: f64,
) -> Result<ProhaskaFit, AnalysisError> {
    let (x, y): (Vec<f64>, Vec<f64>) = rows
        .iter()
        .filter(|r| r.froude_number <= max_froude)
        .filter(|r| r.model.cf_ittc > 0.0 && r.model.resistance_coeff > 0.0)
        .map(|r| {
            let cf = r.model.cf_ittc;
            (r.froude_number.powi(4) / cf, r.model.resistance_coeff / cf)
        })
        .unzip();

    debug!(points = x.len(), max_froude, "Prohaska points selected");

    if x.len() < MIN_PROHASKA_POINTS {
        return Err(AnalysisError::InsufficientData {
            needed: MIN_PROHASKA_POINTS,
            available: x.len(),
        });
    }

    let fit = linear_regression(&x, &y).ok_or(AnalysisError::DegenerateFit)?;

    info!(
        form_factor = fit.intercept,
        slope = fit.slope,
        r_squared = fit.r_squared,
        points = x.len(),
        "Prohaska fit"
    );

    Ok(ProhaskaFit {
        form_factor: fit.intercept,
        slope: fit.slope,
        r_squared: fit.r_squared,
        points: x.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FullScaleResults, ModelScaleResults, RepeatSpread};

    fn averaged(fr: f64, cf: f64, ctm: f64) -> AveragedRow {
        AveragedRow {
            repeats: 1,
            condition: 13,
            speed: 0.0,
            fwd_lvdt: 0.0,
            aft_lvdt: 0.0,
            drag: 0.0,
            heave: 0.0,
            trim: 0.0,
            froude_number: fr,
            model: ModelScaleResults {
                cf_ittc: cf,
                resistance_coeff: ctm,
                ..Default::default()
            },
            full_scale: FullScaleResults::default(),
            spread: RepeatSpread::default(),
        }
    }

    #[test]
    fn test_recovers_synthetic_form_factor() {
        let k1 = 1.18;
        let c = 2.5;
        let points = [
            (0.08, 0.0050),
            (0.11, 0.0046),
            (0.14, 0.0043),
            (0.17, 0.0041),
            (0.30, 0.0035),
        ];
        let rows: Vec<AveragedRow> = points
            .iter()
            .map(|&(fr, cf): &(f64, f64)| averaged(fr, cf, cf * k1 + c * fr.powi(4)))
            .collect();
        let fit = estimate_form_factor(&rows, 0.2).expect("fit");
        assert_eq!(fit.points, 4);
        assert!((fit.form_factor - k1).abs() < 1e-9, "got {}", fit.form_factor);
        assert!((fit.slope - c).abs() < 1e-6);
        assert!(fit.r_squared > 0.999);
    }

    #[test]
    fn test_too_few_points() {
        let rows = vec![averaged(0.1, 0.005, 0.006), averaged(0.15, 0.0045, 0.0055)];
        let err = estimate_form_factor(&rows, 0.2).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { needed: 3, available: 2 }));
    }

    #[test]
    fn test_identical_points_are_degenerate() {
        let rows = vec![averaged(0.1, 0.005, 0.006); 3];
        let err = estimate_form_factor(&rows, 0.2).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateFit));
    }
}
