//! Results table rows
//!
//! The results table is positional: column semantics are fixed by the
//! campaign's schema rather than by a header row. `ResultsRow` maps that
//! schema onto named fields so nothing downstream indexes by column number.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ConditionCode;

/// Number of columns every results row must carry (columns 1-28).
pub const BASE_COLUMNS: usize = 28;

/// Rows with at least this many columns carry per-channel statistics
/// (columns 29-44).
pub const CHANNEL_STATS_COLUMNS: usize = 44;

/// Widest row written by any version of the acquisition scripts.
pub const MAX_COLUMNS: usize = 57;

/// Column of the run number (1-based).
pub const RUN_NUMBER_COLUMN: usize = 1;

/// Column of the condition code (1-based).
pub const CONDITION_COLUMN: usize = 28;

/// Why a line of numbers could not become a [`ResultsRow`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("{found} columns, at least 28 required")]
    TooFewColumns { found: usize },

    /// An identifier column holds a value that is not a whole number in range
    #[error("column {column}: {value} is not a valid identifier")]
    InvalidIdentifier { column: usize, value: f64 },
}

/// Whole number in `0..=max`, or `None`.
fn whole_number(value: f64, max: f64) -> Option<f64> {
    (value.is_finite() && value.fract() == 0.0 && (0.0..=max).contains(&value)).then_some(value)
}

/// Min / max / mean / standard deviation of one acquired channel over a run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl ChannelStats {
    fn from_slice(values: &[f64]) -> Self {
        Self {
            min: values[0],
            max: values[1],
            mean: values[2],
            std_dev: values[3],
        }
    }
}

/// Per-channel statistics for the four acquired channels (columns 29-44).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunChannelStats {
    /// Carriage speed - cols 29-32
    pub speed: ChannelStats,
    /// Forward LVDT - cols 33-36
    pub fwd_lvdt: ChannelStats,
    /// Aft LVDT - cols 37-40
    pub aft_lvdt: ChannelStats,
    /// Drag - cols 41-44
    pub drag: ChannelStats,
}

/// One test run of the results table.
///
/// Field comments give the unit and the 1-based column number of the
/// on-disk schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsRow {
    /// Run number - col 1
    pub run_number: u32,
    /// Sampling frequency (Hz) - col 2
    pub sampling_frequency: f64,
    /// Number of samples - col 3
    pub sample_count: u64,
    /// Record time (s) - col 4
    pub record_time: f64,

    // === Mean channel values ===
    /// Carriage speed (m/s) - col 5
    pub speed: f64,
    /// Forward LVDT (mm) - col 6
    pub fwd_lvdt: f64,
    /// Aft LVDT (mm) - col 7
    pub aft_lvdt: f64,
    /// Drag (g) - col 8
    pub drag: f64,

    // === Model scale ===
    /// Model total resistance Rtm (N) - col 9
    pub model_resistance: f64,
    /// Model total resistance coefficient CTm - col 10
    pub model_resistance_coeff: f64,
    /// Froude length number - col 11
    pub froude_number: f64,
    /// Heave (mm) - col 12
    pub heave: f64,
    /// Dynamic trim (deg) - col 13
    pub trim: f64,
    /// Model Reynolds number - col 14
    pub model_reynolds: f64,
    /// Model CF, ITTC'57 - col 15
    pub model_cf_ittc: f64,
    /// Model CF, Grigson - col 16
    pub model_cf_grigson: f64,
    /// Model residual resistance coefficient CR - col 17
    pub model_residual_coeff: f64,

    // === Full scale ===
    /// Full-scale speed (m/s) - col 18
    pub full_scale_speed: f64,
    /// Full-scale speed (knots) - col 19
    pub full_scale_speed_knots: f64,
    /// Full-scale Reynolds number - col 20
    pub full_scale_reynolds: f64,
    /// Full-scale CF, ITTC'57 - col 21
    pub full_scale_cf_ittc: f64,
    /// Full-scale CF, Grigson - col 22
    pub full_scale_cf_grigson: f64,
    /// Roughness allowance ΔCF - col 23
    pub roughness_allowance: f64,
    /// Correlation allowance CA - col 24
    pub correlation_allowance: f64,
    /// Air resistance coefficient CAA - col 25
    pub air_resistance_coeff: f64,
    /// Full-scale total resistance coefficient CTs - col 26
    pub full_scale_resistance_coeff: f64,
    /// Full-scale total resistance Rts (N) - col 27
    pub full_scale_resistance: f64,

    /// Run condition code - col 28
    pub condition: ConditionCode,

    /// Per-channel statistics, present in the wider table versions - cols 29-44
    #[serde(default)]
    pub channel_stats: Option<RunChannelStats>,
}

impl ResultsRow {
    /// Build a row from the numeric columns of one table line.
    ///
    /// Columns beyond 44 are accepted and ignored. The run number and
    /// condition code must be whole numbers within `u32` / `u8` range.
    ///
    /// # Errors
    /// `RowError::TooFewColumns` below [`BASE_COLUMNS`] values,
    /// `RowError::InvalidIdentifier` for a fractional, negative, non-finite
    /// or out-of-range run number or condition code.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_columns(values: &[f64]) -> Result<Self, RowError> {
        if values.len() < BASE_COLUMNS {
            return Err(RowError::TooFewColumns {
                found: values.len(),
            });
        }
        let c = |col: usize| values[col - 1];
        let identifier = |column: usize, max: f64| {
            whole_number(c(column), max).ok_or(RowError::InvalidIdentifier {
                column,
                value: c(column),
            })
        };
        let run_number = identifier(RUN_NUMBER_COLUMN, f64::from(u32::MAX))? as u32;
        let condition =
            identifier(CONDITION_COLUMN, f64::from(ConditionCode::MAX))? as ConditionCode;

        let channel_stats = (values.len() >= CHANNEL_STATS_COLUMNS).then(|| RunChannelStats {
            speed: ChannelStats::from_slice(&values[28..32]),
            fwd_lvdt: ChannelStats::from_slice(&values[32..36]),
            aft_lvdt: ChannelStats::from_slice(&values[36..40]),
            drag: ChannelStats::from_slice(&values[40..44]),
        });

        Ok(Self {
            run_number,
            sampling_frequency: c(2),
            sample_count: c(3).round() as u64,
            record_time: c(4),
            speed: c(5),
            fwd_lvdt: c(6),
            aft_lvdt: c(7),
            drag: c(8),
            model_resistance: c(9),
            model_resistance_coeff: c(10),
            froude_number: c(11),
            heave: c(12),
            trim: c(13),
            model_reynolds: c(14),
            model_cf_ittc: c(15),
            model_cf_grigson: c(16),
            model_residual_coeff: c(17),
            full_scale_speed: c(18),
            full_scale_speed_knots: c(19),
            full_scale_reynolds: c(20),
            full_scale_cf_ittc: c(21),
            full_scale_cf_grigson: c(22),
            roughness_allowance: c(23),
            correlation_allowance: c(24),
            air_resistance_coeff: c(25),
            full_scale_resistance_coeff: c(26),
            full_scale_resistance: c(27),
            condition,
            channel_stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_from_columns_maps_schema_positions() {
        let row = ResultsRow::from_columns(&columns(BASE_COLUMNS)).expect("28 columns is enough");
        assert_eq!(row.run_number, 1);
        assert_eq!(row.speed, 5.0);
        assert_eq!(row.fwd_lvdt, 6.0);
        assert_eq!(row.aft_lvdt, 7.0);
        assert_eq!(row.drag, 8.0);
        assert_eq!(row.model_resistance_coeff, 10.0);
        assert_eq!(row.froude_number, 11.0);
        assert_eq!(row.trim, 13.0);
        assert_eq!(row.full_scale_resistance, 27.0);
        assert_eq!(row.condition, 28);
        assert!(row.channel_stats.is_none());
    }

    #[test]
    fn test_from_columns_too_short() {
        assert_eq!(
            ResultsRow::from_columns(&columns(BASE_COLUMNS - 1)),
            Err(RowError::TooFewColumns { found: 27 })
        );
    }

    #[test]
    fn test_from_columns_rejects_bad_identifiers() {
        for bad in [7.6, 300.0, -1.0, f64::NAN] {
            let mut cols = columns(BASE_COLUMNS);
            cols[CONDITION_COLUMN - 1] = bad;
            let err = ResultsRow::from_columns(&cols).unwrap_err();
            assert!(
                matches!(err, RowError::InvalidIdentifier { column: 28, .. }),
                "condition {bad} should be rejected"
            );
        }

        let mut cols = columns(BASE_COLUMNS);
        cols[RUN_NUMBER_COLUMN - 1] = 81.6;
        assert!(matches!(
            ResultsRow::from_columns(&cols),
            Err(RowError::InvalidIdentifier { column: 1, .. })
        ));
    }

    #[test]
    fn test_from_columns_accepts_code_255() {
        let mut cols = columns(BASE_COLUMNS);
        cols[CONDITION_COLUMN - 1] = 255.0;
        assert_eq!(ResultsRow::from_columns(&cols).map(|r| r.condition), Ok(255));
    }

    #[test]
    fn test_from_columns_reads_channel_stats() {
        let row = ResultsRow::from_columns(&columns(MAX_COLUMNS)).expect("57 columns");
        let stats = row.channel_stats.expect("44+ columns carry stats");
        assert_eq!(stats.speed.min, 29.0);
        assert_eq!(stats.speed.std_dev, 32.0);
        assert_eq!(stats.drag.min, 41.0);
        assert_eq!(stats.drag.std_dev, 44.0);
    }
}
