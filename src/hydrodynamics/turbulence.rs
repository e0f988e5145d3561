//! Turbulence-stimulator resistance correction
//!
//! Studs fitted to trip the boundary layer add parasitic drag that must be
//! removed from the measured model resistance. The campaign fitted that drag
//! as a straight line in Froude number.

/// Turbulence-stimulator drag from the fitted line: TS = slope × Fr + intercept (N).
pub fn turbulence_stimulator_drag(froude: f64, slope: f64, intercept: f64) -> f64 {
    slope * froude + intercept
}

/// Correction to subtract from the model resistance, if any.
///
/// Only a positive fitted drag is subtracted; at low Froude numbers the line
/// goes negative and the measured resistance is left unchanged.
pub fn turbulence_stimulator_correction(froude: f64, slope: f64, intercept: f64) -> Option<f64> {
    let drag = turbulence_stimulator_drag(froude, slope, intercept);
    (drag > 0.0).then_some(drag)
}
