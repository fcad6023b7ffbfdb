//! Cross-reference checks between cultivar and ecotype files
//!
//! Every cultivar names an ECO# in the companion ecotype file. These
//! checks count how often each ecotype is referenced and report cultivars
//! whose ECO# resolves to nothing; `DFAULT` is exempt by convention.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::app::models::{CultivarRow, EcotypeRow, GenotypeRow};
use crate::constants::DEFAULT_ECOTYPE;

/// A cultivar whose ECO# does not exist in the ecotype file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DanglingEcotypeRef {
    /// VAR# of the referencing cultivar
    pub var_num: String,
    /// The ECO# it names
    pub eco_num: String,
}

impl fmt::Display for DanglingEcotypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ECO# '{}' not found in ECO file",
            self.var_num, self.eco_num
        )
    }
}

/// Count how many non-sentinel cultivars reference each ECO#
pub fn reference_counts(cultivars: &[CultivarRow]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for row in cultivars {
        if row.is_sentinel() {
            continue;
        }
        *counts.entry(row.eco_num.clone()).or_insert(0) += 1;
    }
    counts
}

/// Report cultivars whose ECO# is missing from the ecotype file.
///
/// Sentinel rows on either side are ignored, and the `DFAULT` fallback
/// cultivar is exempt.
pub fn missing_ecotype_refs(
    cultivars: &[CultivarRow],
    ecotypes: &[EcotypeRow],
) -> Vec<DanglingEcotypeRef> {
    let known: HashSet<&str> = ecotypes
        .iter()
        .filter(|e| !e.is_sentinel())
        .map(|e| e.eco_num.as_str())
        .collect();

    cultivars
        .iter()
        .filter(|c| !c.is_sentinel())
        .filter(|c| c.var_num != DEFAULT_ECOTYPE && !known.contains(c.eco_num.as_str()))
        .map(|c| DanglingEcotypeRef {
            var_num: c.var_num.clone(),
            eco_num: c.eco_num.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CUL_PARAM_COUNT, ECO_PARAM_COUNT, SENTINEL_MIN_ID};

    fn cul(var: &str, eco: &str) -> CultivarRow {
        CultivarRow {
            var_num: var.to_string(),
            vr_name: "TEST".to_string(),
            exp_no: ".".to_string(),
            eco_num: eco.to_string(),
            params: vec![0.0; CUL_PARAM_COUNT],
        }
    }

    fn eco(id: &str) -> EcotypeRow {
        EcotypeRow {
            eco_num: id.to_string(),
            eco_name: "TEST".to_string(),
            mg: " 0".to_string(),
            tm: " 0".to_string(),
            params: vec![0.0; ECO_PARAM_COUNT],
        }
    }

    #[test]
    fn test_reference_counts_skip_sentinels() {
        let cultivars = vec![
            cul("IB0001", "SB0101"),
            cul("IB0002", "SB0101"),
            cul("IB0003", "SB0201"),
            cul(SENTINEL_MIN_ID, "SB0101"),
        ];
        let counts = reference_counts(&cultivars);
        assert_eq!(counts.get("SB0101"), Some(&2));
        assert_eq!(counts.get("SB0201"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_missing_refs_reported_with_dfault_cultivar_exempt() {
        let cultivars = vec![
            cul("IB0001", "SB0101"),
            cul("IB0002", "GHOST1"),
            cul("DFAULT", "GHOST3"),
            cul(SENTINEL_MIN_ID, "GHOST2"),
        ];
        let ecotypes = vec![eco("SB0101"), eco(SENTINEL_MIN_ID)];

        let missing = missing_ecotype_refs(&cultivars, &ecotypes);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].var_num, "IB0002");
        assert_eq!(
            missing[0].to_string(),
            "IB0002: ECO# 'GHOST1' not found in ECO file"
        );
    }

    #[test]
    fn test_sentinel_ecotype_does_not_satisfy_refs() {
        // An ECO# equal to a sentinel code only exists as a bounds row
        let cultivars = vec![cul("IB0001", SENTINEL_MIN_ID)];
        let ecotypes = vec![eco(SENTINEL_MIN_ID)];
        let missing = missing_ecotype_refs(&cultivars, &ecotypes);
        assert_eq!(missing.len(), 1);
    }
}
