//! Hull condition constants
//!
//! Each experimental condition of the campaign corresponds to one loading /
//! trim configuration of the demihull. The geometry for a condition is
//! measured at model scale; full-scale values follow from the scale ratio.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Experimental run condition code (1-13 in this campaign).
pub type ConditionCode = u8;

/// Model-scale hydrostatic particulars for one condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullConditionConstants {
    /// Condition code this geometry applies to
    pub code: ConditionCode,
    /// Human-readable description, e.g. "1,500t, level static trim"
    #[serde(default)]
    pub label: String,
    /// Model waterline length (m)
    pub lwl_m: f64,
    /// Model wetted surface area (m²)
    pub wsa_m2: f64,
    /// Model draft (m)
    pub draft_m: f64,
    /// Block coefficient
    pub block_coefficient: f64,
}

impl HullConditionConstants {
    /// Full-scale waterline length: `LWL_ms × λ`.
    pub fn full_scale_lwl(&self, scale_ratio: f64) -> f64 {
        self.lwl_m * scale_ratio
    }

    /// Full-scale wetted surface area: `S_ms × λ²`.
    pub fn full_scale_wsa(&self, scale_ratio: f64) -> f64 {
        self.wsa_m2 * scale_ratio.powi(2)
    }

    /// Full-scale draft: `T_ms × λ`.
    pub fn full_scale_draft(&self, scale_ratio: f64) -> f64 {
        self.draft_m * scale_ratio
    }
}

/// Immutable lookup from condition code to hull constants.
#[derive(Debug, Clone, PartialEq)]
pub struct HullConditionTable {
    entries: BTreeMap<ConditionCode, HullConditionConstants>,
}

impl HullConditionTable {
    /// Build a table from a list of entries. A later entry with the same
    /// code replaces an earlier one.
    pub fn new(entries: impl IntoIterator<Item = HullConditionConstants>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.code, e)).collect(),
        }
    }

    pub fn get(&self, code: ConditionCode) -> Option<&HullConditionConstants> {
        self.entries.get(&code)
    }

    pub fn contains(&self, code: ConditionCode) -> bool {
        self.entries.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = &HullConditionConstants> {
        self.entries.values()
    }
}

impl Default for HullConditionTable {
    fn default() -> Self {
        Self::new(crate::config::defaults::campaign_hull_conditions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_all_codes() {
        let table = HullConditionTable::default();
        assert_eq!(table.len(), 13);
        for code in 1..=13 {
            assert!(table.contains(code), "missing condition {code}");
        }
        assert!(table.get(0).is_none());
        assert!(table.get(14).is_none());
    }

    #[test]
    fn test_full_scale_geometry_condition_7() {
        let table = HullConditionTable::default();
        let c7 = table.get(7).expect("condition 7");
        let lambda = 21.6;
        assert!((c7.full_scale_lwl(lambda) - c7.lwl_m * 21.6).abs() < 1e-12);
        assert!((c7.full_scale_wsa(lambda) - c7.wsa_m2 * 21.6 * 21.6).abs() < 1e-9);
        assert!((c7.full_scale_draft(lambda) - c7.draft_m * 21.6).abs() < 1e-12);
    }

    #[test]
    fn test_later_entry_replaces_earlier() {
        let a = HullConditionConstants {
            code: 3,
            label: "first".to_string(),
            lwl_m: 1.0,
            wsa_m2: 1.0,
            draft_m: 0.1,
            block_coefficient: 0.5,
        };
        let b = HullConditionConstants {
            label: "second".to_string(),
            ..a.clone()
        };
        let table = HullConditionTable::new([a, b]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(3).map(|c| c.label.as_str()), Some("second"));
    }
}
