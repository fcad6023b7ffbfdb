//! Range validation engine for genotype row collections
//!
//! The reserved `999991` (MINIMA) and `999992` (MAXIMA) rows carry the
//! authoritative per-column bounds. They are extracted once into an
//! explicit [`ParamBounds`] pair rather than re-derived downstream from the
//! magic identifiers. Violations are a pure computed view: nothing here
//! mutates rows, and reports must be recomputed after any edit.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::app::models::{GenotypeRow, Violation};
use crate::constants::{SENTINEL_MAX_ID, SENTINEL_MIN_ID};

/// Per-column bounds lifted from the MINIMA/MAXIMA sentinel rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamBounds {
    /// Lower bounds, one per parameter column
    pub min: Vec<f64>,
    /// Upper bounds, one per parameter column
    pub max: Vec<f64>,
}

impl ParamBounds {
    /// Extract bounds from a row collection.
    ///
    /// Returns `None` unless both sentinel rows are present; when a
    /// sentinel identifier appears more than once, the last occurrence
    /// wins.
    pub fn from_rows<R: GenotypeRow>(rows: &[R]) -> Option<Self> {
        let mut min = None;
        let mut max = None;

        for row in rows {
            match row.identifier() {
                SENTINEL_MIN_ID => min = Some(row.params().to_vec()),
                SENTINEL_MAX_ID => max = Some(row.params().to_vec()),
                _ => {}
            }
        }

        match (min, max) {
            (Some(min), Some(max)) => Some(Self { min, max }),
            _ => {
                debug!("No complete MINIMA/MAXIMA sentinel pair; range checks disabled");
                None
            }
        }
    }

    /// Bound pair for one column, if configured there.
    ///
    /// A non-positive span (max <= min) means "bounds not configured" and
    /// disables checking for that column.
    pub fn at(&self, idx: usize) -> Option<(f64, f64)> {
        let (lo, hi) = (*self.min.get(idx)?, *self.max.get(idx)?);
        (hi > lo).then_some((lo, hi))
    }

    /// Whether a value lies strictly outside the configured bounds at a
    /// column. Unconfigured columns never flag.
    pub fn is_out_of_range(&self, idx: usize, value: f64) -> bool {
        match self.at(idx) {
            Some((lo, hi)) => value < lo || value > hi,
            None => false,
        }
    }
}

/// Compute the out-of-range violations for a row collection, deriving the
/// bounds from its own sentinel rows.
///
/// With no complete sentinel pair this is a no-op: no bounds, no
/// violations. Sentinel rows themselves are never checked.
pub fn violations<R: GenotypeRow>(rows: &[R], param_names: &[&str]) -> Vec<Violation> {
    match ParamBounds::from_rows(rows) {
        Some(bounds) => violations_with_bounds(rows, &bounds, param_names),
        None => Vec::new(),
    }
}

/// Compute out-of-range violations against explicit bounds
pub fn violations_with_bounds<R: GenotypeRow>(
    rows: &[R],
    bounds: &ParamBounds,
    param_names: &[&str],
) -> Vec<Violation> {
    let mut out = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        if row.is_sentinel() {
            continue;
        }

        for (idx, &value) in row.params().iter().enumerate().take(param_names.len()) {
            if bounds.is_out_of_range(idx, value) {
                let (lo, hi) = bounds.at(idx).unwrap_or((0.0, 0.0));
                out.push(Violation {
                    row_index,
                    identifier: row.identifier().to_string(),
                    param_name: param_names[idx].to_string(),
                    value,
                    min: lo,
                    max: hi,
                });
            }
        }
    }

    out
}

/// Flag every NaN or infinite parameter value.
///
/// This check is always on and independent of sentinel presence; bounds in
/// the returned records are zero when no sentinel pair exists.
pub fn non_finite<R: GenotypeRow>(rows: &[R], param_names: &[&str]) -> Vec<Violation> {
    let bounds = ParamBounds::from_rows(rows);
    let mut out = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        if row.is_sentinel() {
            continue;
        }

        for (idx, &value) in row.params().iter().enumerate().take(param_names.len()) {
            if !value.is_finite() {
                let (lo, hi) = bounds
                    .as_ref()
                    .and_then(|b| b.at(idx))
                    .unwrap_or((0.0, 0.0));
                out.push(Violation {
                    row_index,
                    identifier: row.identifier().to_string(),
                    param_name: param_names[idx].to_string(),
                    value,
                    min: lo,
                    max: hi,
                });
            }
        }
    }

    out
}

/// A mandatory text field left blank on a data row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlankField {
    /// Index of the offending row within its collection
    pub row_index: usize,
    /// Identifier of the offending row, possibly itself blank
    pub identifier: String,
    /// Column label of the blank field (VAR#, VRNAME, ECO#, ECONAME)
    pub field: String,
}

impl fmt::Display for BlankField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: empty {}", self.identifier, self.field)
    }
}

/// Flag every data row whose identifier or name field is blank.
///
/// Sentinel rows are exempt, as everywhere else; a row can contribute two
/// findings when both fields are blank.
pub fn blank_fields<R: GenotypeRow>(rows: &[R]) -> Vec<BlankField> {
    let mut out = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        if row.is_sentinel() {
            continue;
        }

        if row.identifier().trim().is_empty() {
            out.push(BlankField {
                row_index,
                identifier: row.identifier().to_string(),
                field: R::ID_LABEL.to_string(),
            });
        }
        if row.name().trim().is_empty() {
            out.push(BlankField {
                row_index,
                identifier: row.identifier().to_string(),
                field: R::NAME_LABEL.to_string(),
            });
        }
    }

    out
}

/// Combined validation report for one file
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Out-of-range cells, in row order
    pub out_of_range: Vec<Violation>,
    /// Non-finite cells, in row order
    pub non_finite: Vec<Violation>,
    /// Rows with a blank identifier or name, in row order
    pub blank_fields: Vec<BlankField>,
}

impl ValidationReport {
    /// Run all checks over a row collection
    pub fn compute<R: GenotypeRow>(rows: &[R], param_names: &[&str]) -> Self {
        Self {
            out_of_range: violations(rows, param_names),
            non_finite: non_finite(rows, param_names),
            blank_fields: blank_fields(rows),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.out_of_range.is_empty() && self.non_finite.is_empty() && self.blank_fields.is_empty()
    }

    pub fn total(&self) -> usize {
        self.out_of_range.len() + self.non_finite.len() + self.blank_fields.len()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.out_of_range {
            writeln!(f, "out of range  {v}")?;
        }
        for v in &self.non_finite {
            writeln!(f, "non-finite    {}: {}={}", v.identifier, v.param_name, v.value)?;
        }
        for b in &self.blank_fields {
            writeln!(f, "blank field   {b}")?;
        }
        Ok(())
    }
}
