//! Hydrodynamics Module
//!
//! Deterministic closed-form calculations for towing-tank resistance tests.
//! Nothing here reads configuration: every constant is an argument, so the
//! same functions serve model and full scale.
//!
//! ## Contents
//! - `friction` - ITTC'57 and Grigson CF, roughness / correlation / air allowances
//! - `similarity` - Froude and Reynolds numbers, scaling, resistance and power
//! - `attitude` - heave and trim from the LVDT pair
//! - `turbulence` - turbulence-stimulator drag correction

pub mod attitude;
pub mod friction;
pub mod similarity;
pub mod turbulence;

pub use attitude::{heave, trim_degrees};
pub use friction::{
    air_resistance_coeff, cf_grigson, cf_ittc57, correlation_allowance, roughness_allowance,
    GRIGSON_BRANCH_REYNOLDS,
};
pub use similarity::{
    brake_power, drag_to_newtons, effective_power, froude_number, full_scale_speed,
    resistance_coefficient, resistance_from_coefficient, reynolds_number, round_to, MS_TO_KNOTS,
};
pub use turbulence::{turbulence_stimulator_correction, turbulence_stimulator_drag};
