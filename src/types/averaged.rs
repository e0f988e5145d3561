//! Averaged output rows

use serde::{Deserialize, Serialize};

use super::ConditionCode;

/// Number of columns written per averaged row.
pub const AVERAGED_COLUMNS: usize = 40;

/// Column headings of the averaged table, in output order.
pub const AVERAGED_COLUMN_NAMES: [&str; AVERAGED_COLUMNS] = [
    "repeats",
    "condition",
    "speed_m_s",
    "fwd_lvdt_mm",
    "aft_lvdt_mm",
    "drag_g",
    "heave_mm",
    "trim_deg",
    "froude",
    "rtm_n",
    "ts_reduction_n",
    "ctm",
    "re_ms",
    "cfm_ittc",
    "cfm_grigson",
    "cr",
    "speed_fs_m_s",
    "speed_fs_kn",
    "re_fs",
    "cfs_ittc",
    "cfs_grigson",
    "delta_cf",
    "ca",
    "caa",
    "cts",
    "rts_n",
    "pe_ms_w",
    "pb_ms_w",
    "pe_fs_w",
    "pb_fs_w",
    "lwl_ms_m",
    "wsa_ms_m2",
    "lwl_fs_m",
    "wsa_fs_m2",
    "std_speed",
    "std_fwd_lvdt",
    "std_aft_lvdt",
    "std_drag",
    "std_trim",
    "std_ctm_x1000",
];

/// Model-scale results for one speed group.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelScaleResults {
    /// Waterline length used (m)
    pub lwl: f64,
    /// Wetted surface area used (m²)
    pub wsa: f64,
    /// Total resistance after turbulence-stimulator correction (N)
    pub total_resistance: f64,
    /// Turbulence-stimulator resistance actually subtracted (N); zero when
    /// the correction did not apply
    pub ts_reduction: f64,
    /// Total resistance coefficient CTm
    pub resistance_coeff: f64,
    pub reynolds: f64,
    pub cf_ittc: f64,
    pub cf_grigson: f64,
    /// Residual resistance coefficient CR (Grigson based)
    pub residual_coeff: f64,
    /// Effective power (W)
    pub effective_power: f64,
    /// Brake power (W)
    pub brake_power: f64,
}

/// Full-scale extrapolation for one speed group.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FullScaleResults {
    pub lwl: f64,
    pub wsa: f64,
    /// Ship speed (m/s)
    pub speed: f64,
    /// Ship speed (knots)
    pub speed_knots: f64,
    pub reynolds: f64,
    pub cf_ittc: f64,
    pub cf_grigson: f64,
    /// ITTC 1978 roughness allowance ΔCF
    pub roughness_allowance: f64,
    pub correlation_allowance: f64,
    pub air_resistance_coeff: f64,
    /// Total resistance coefficient CTs
    pub resistance_coeff: f64,
    /// Total resistance (N)
    pub total_resistance: f64,
    /// Effective power (W)
    pub effective_power: f64,
    /// Brake power (W)
    pub brake_power: f64,
}

/// Population standard deviations over the repeated runs of a group.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RepeatSpread {
    pub speed: f64,
    pub fwd_lvdt: f64,
    pub aft_lvdt: f64,
    pub drag: f64,
    pub trim: f64,
    /// Spread of CTm scaled by 1000
    pub resistance_coeff_x1000: f64,
}

/// One averaged speed group of a repeated-run condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AveragedRow {
    /// Number of repeated runs averaged
    pub repeats: usize,
    pub condition: ConditionCode,

    // === Averaged channels ===
    /// Mean carriage speed (m/s)
    pub speed: f64,
    /// Mean forward LVDT (mm)
    pub fwd_lvdt: f64,
    /// Mean aft LVDT (mm)
    pub aft_lvdt: f64,
    /// Mean drag (g)
    pub drag: f64,

    // === Attitude ===
    /// Heave (mm)
    pub heave: f64,
    /// Dynamic trim (deg)
    pub trim: f64,
    /// Froude length number, rounded to two decimals
    pub froude_number: f64,

    pub model: ModelScaleResults,
    pub full_scale: FullScaleResults,
    pub spread: RepeatSpread,
}

impl AveragedRow {
    /// Flatten into the output column order of [`AVERAGED_COLUMN_NAMES`].
    #[allow(clippy::cast_precision_loss)]
    pub fn to_columns(&self) -> [f64; AVERAGED_COLUMNS] {
        let m = &self.model;
        let fs = &self.full_scale;
        let sd = &self.spread;
        [
            self.repeats as f64,
            f64::from(self.condition),
            self.speed,
            self.fwd_lvdt,
            self.aft_lvdt,
            self.drag,
            self.heave,
            self.trim,
            self.froude_number,
            m.total_resistance,
            m.ts_reduction,
            m.resistance_coeff,
            m.reynolds,
            m.cf_ittc,
            m.cf_grigson,
            m.residual_coeff,
            fs.speed,
            fs.speed_knots,
            fs.reynolds,
            fs.cf_ittc,
            fs.cf_grigson,
            fs.roughness_allowance,
            fs.correlation_allowance,
            fs.air_resistance_coeff,
            fs.resistance_coeff,
            fs.total_resistance,
            m.effective_power,
            m.brake_power,
            fs.effective_power,
            fs.brake_power,
            m.lwl,
            m.wsa,
            fs.lwl,
            fs.wsa,
            sd.speed,
            sd.fwd_lvdt,
            sd.aft_lvdt,
            sd.drag,
            sd.trim,
            sd.resistance_coeff_x1000,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_columns_order() {
        let row = AveragedRow {
            repeats: 3,
            condition: 7,
            speed: 1.5,
            fwd_lvdt: 10.0,
            aft_lvdt: 6.0,
            drag: 250.0,
            heave: 8.0,
            trim: 0.2,
            froude_number: 0.23,
            model: ModelScaleResults {
                total_resistance: 2.1,
                ..Default::default()
            },
            full_scale: FullScaleResults {
                total_resistance: 1.0e5,
                ..Default::default()
            },
            spread: RepeatSpread {
                resistance_coeff_x1000: 0.05,
                ..Default::default()
            },
        };
        let cols = row.to_columns();
        assert_eq!(cols[0], 3.0);
        assert_eq!(cols[1], 7.0);
        assert_eq!(cols[8], 0.23);
        assert_eq!(cols[9], 2.1);
        assert_eq!(cols[25], 1.0e5);
        assert_eq!(cols[AVERAGED_COLUMNS - 1], 0.05);
        assert_eq!(AVERAGED_COLUMN_NAMES[25], "rts_n");
    }
}
