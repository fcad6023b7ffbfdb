//! Core data models for genotype file rows and validation results
//!
//! Rows are plain in-memory values: created by the codec or by explicit
//! construction, mutated in place by field-level edits, and replaced
//! wholesale on the next load. Header lines live alongside the rows but are
//! independent values; editing rows never touches them.

use serde::{Deserialize, Serialize};

use crate::constants::{CUL_PARAM_COUNT, DEFAULT_ECOTYPE, ECO_PARAM_COUNT, ID_WIDTH, is_sentinel_id};

/// Common surface of cultivar and ecotype rows.
///
/// The validation engine and the row-table operations work against this
/// trait so the same logic serves both file variants.
pub trait GenotypeRow: Clone {
    /// Fixed parameter count of this variant (18 cultivar, 16 ecotype)
    const PARAM_COUNT: usize;

    /// Column label of the identifier field (`VAR#` or `ECO#`)
    const ID_LABEL: &'static str;

    /// Column label of the name field (`VRNAME` or `ECONAME`)
    const NAME_LABEL: &'static str;

    /// Primary-key identifier (VAR# or ECO#)
    fn identifier(&self) -> &str;

    /// Display name (VRNAME or ECONAME)
    fn name(&self) -> &str;

    /// Replace the identifier, truncated to the fixed field width
    fn set_identifier(&mut self, id: &str);

    /// Ordered numeric parameters, always exactly `PARAM_COUNT` long
    fn params(&self) -> &[f64];

    /// Mutable access to the parameter vector
    fn params_mut(&mut self) -> &mut [f64];

    /// Template row used when adding a fresh record to a table
    fn template() -> Self;

    /// True when the identifier equals one of the two reserved bounds codes
    fn is_sentinel(&self) -> bool {
        is_sentinel_id(self.identifier())
    }
}

/// Truncate a string to a fixed number of characters
pub(crate) fn clip(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

/// One cultivar record of a `.CUL` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CultivarRow {
    /// VAR# identifier, columns [0, 6)
    pub var_num: String,
    /// VRNAME display name, columns [7, 20)
    pub vr_name: String,
    /// Experiment-number token; `.` means "none" and marks bounds rows
    pub exp_no: String,
    /// ECO# cross-reference into the companion ecotype file
    pub eco_num: String,
    /// The 18 numeric coefficients, in column order
    pub params: Vec<f64>,
}

impl CultivarRow {
    pub fn set_vr_name(&mut self, name: &str) {
        self.vr_name = clip(name, 13);
    }

    pub fn set_exp_no(&mut self, exp_no: &str) {
        self.exp_no = clip(exp_no, 1);
    }

    pub fn set_eco_num(&mut self, eco_num: &str) {
        self.eco_num = clip(eco_num, ID_WIDTH);
    }
}

impl GenotypeRow for CultivarRow {
    const PARAM_COUNT: usize = CUL_PARAM_COUNT;
    const ID_LABEL: &'static str = "VAR#";
    const NAME_LABEL: &'static str = "VRNAME";

    fn identifier(&self) -> &str {
        &self.var_num
    }

    fn name(&self) -> &str {
        &self.vr_name
    }

    fn set_identifier(&mut self, id: &str) {
        self.var_num = clip(id, ID_WIDTH);
    }

    fn params(&self) -> &[f64] {
        &self.params
    }

    fn params_mut(&mut self) -> &mut [f64] {
        &mut self.params
    }

    fn template() -> Self {
        Self {
            var_num: "NEW001".to_string(),
            vr_name: "NEW CULTIVAR".to_string(),
            exp_no: " ".to_string(),
            eco_num: DEFAULT_ECOTYPE.to_string(),
            params: vec![0.0; CUL_PARAM_COUNT],
        }
    }
}

/// One ecotype record of an `.ECO` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcotypeRow {
    /// ECO# identifier, columns [0, 6)
    pub eco_num: String,
    /// ECONAME display name, columns [7, 23)
    pub eco_name: String,
    /// Maturity-group code, 2 characters
    pub mg: String,
    /// Temperature/season type code, 2 characters
    pub tm: String,
    /// The 16 numeric coefficients, in column order
    pub params: Vec<f64>,
}

impl EcotypeRow {
    pub fn set_eco_name(&mut self, name: &str) {
        self.eco_name = clip(name, 16);
    }

    pub fn set_mg(&mut self, mg: &str) {
        self.mg = clip(mg, 2);
    }

    pub fn set_tm(&mut self, tm: &str) {
        self.tm = clip(tm, 2);
    }
}

impl GenotypeRow for EcotypeRow {
    const PARAM_COUNT: usize = ECO_PARAM_COUNT;
    const ID_LABEL: &'static str = "ECO#";
    const NAME_LABEL: &'static str = "ECONAME";

    fn identifier(&self) -> &str {
        &self.eco_num
    }

    fn name(&self) -> &str {
        &self.eco_name
    }

    fn set_identifier(&mut self, id: &str) {
        self.eco_num = clip(id, ID_WIDTH);
    }

    fn params(&self) -> &[f64] {
        &self.params
    }

    fn params_mut(&mut self) -> &mut [f64] {
        &mut self.params
    }

    fn template() -> Self {
        Self {
            eco_num: "NEWE01".to_string(),
            eco_name: "NEW ECOTYPE".to_string(),
            mg: " 0".to_string(),
            tm: " 0".to_string(),
            params: vec![0.0; ECO_PARAM_COUNT],
        }
    }
}

/// One out-of-range or non-finite parameter cell, as reported by the
/// validation engine. A computed view, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Index of the offending row within its collection
    pub row_index: usize,
    /// Identifier of the offending row
    pub identifier: String,
    /// Parameter name from the fixed name table
    pub param_name: String,
    /// Observed value
    pub value: f64,
    /// Lower bound from the MINIMA sentinel row
    pub min: f64,
    /// Upper bound from the MAXIMA sentinel row
    pub max: f64,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}={} (range: {} to {})",
            self.identifier, self.param_name, self.value, self.min, self.max
        )
    }
}

impl Violation {
    /// True when this violation flags a NaN or infinite value rather than
    /// a range breach
    pub fn is_non_finite(&self) -> bool {
        !self.value.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SENTINEL_MAX_ID, SENTINEL_MIN_ID};

    #[test]
    fn test_sentinel_detection() {
        let mut row = CultivarRow::template();
        assert!(!row.is_sentinel());
        row.var_num = SENTINEL_MIN_ID.to_string();
        assert!(row.is_sentinel());
        row.var_num = SENTINEL_MAX_ID.to_string();
        assert!(row.is_sentinel());
    }

    #[test]
    fn test_templates_have_full_parameter_vectors() {
        assert_eq!(CultivarRow::template().params.len(), CUL_PARAM_COUNT);
        assert_eq!(EcotypeRow::template().params.len(), ECO_PARAM_COUNT);
    }

    #[test]
    fn test_setters_truncate_to_field_width() {
        let mut row = CultivarRow::template();
        row.set_identifier("TOOLONG01");
        assert_eq!(row.var_num, "TOOLON");
        row.set_vr_name("A VERY LONG CULTIVAR NAME");
        assert_eq!(row.vr_name.chars().count(), 13);
        row.set_exp_no("12");
        assert_eq!(row.exp_no, "1");

        let mut eco = EcotypeRow::template();
        eco.set_mg("123");
        assert_eq!(eco.mg, "12");
        eco.set_eco_name("AN EXTREMELY LONG ECOTYPE NAME");
        assert_eq!(eco.eco_name.chars().count(), 16);
    }

    #[test]
    fn test_violation_display() {
        let v = Violation {
            row_index: 3,
            identifier: "IB0001".to_string(),
            param_name: "CSDL".to_string(),
            value: 15.0,
            min: 8.0,
            max: 12.0,
        };
        assert_eq!(v.to_string(), "IB0001: CSDL=15 (range: 8 to 12)");
        assert!(!v.is_non_finite());
    }
}
