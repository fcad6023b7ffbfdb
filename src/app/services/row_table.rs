//! In-memory row collections with sentinel-row protection
//!
//! A [`RowTable`] owns the rows of one genotype file between load and save
//! and funnels every mutation through guards that keep the MINIMA/MAXIMA
//! sentinel rows read-only. Header lines are not held here; they share the
//! file's load/save lifecycle but are an independent value.

use tracing::debug;

use crate::app::models::GenotypeRow;

/// Editable collection of rows for one genotype file
#[derive(Debug, Clone, Default)]
pub struct RowTable<R> {
    rows: Vec<R>,
    modified: bool,
}

impl<R: GenotypeRow> RowTable<R> {
    /// Wrap freshly parsed rows; the table starts unmodified
    pub fn from_rows(rows: Vec<R>) -> Self {
        Self {
            rows,
            modified: false,
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether any mutation succeeded since load or the last save
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Mark the table clean, e.g. after a successful write
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Append the variant's template row (`NEW001` / `NEWE01` etc.)
    pub fn add_row(&mut self) -> &R {
        self.rows.push(R::template());
        self.modified = true;
        self.rows.last().expect("row was just pushed")
    }

    /// Append an externally constructed row, e.g. from the line-level
    /// parser
    pub fn push_row(&mut self, row: R) {
        self.rows.push(row);
        self.modified = true;
    }

    /// Duplicate a row to the end of the table. The copy gets an `X`
    /// marker at the end of its identifier, within the fixed field width,
    /// so it must be renamed before use; a copied sentinel loses its
    /// bounds role through that marker.
    pub fn duplicate_row(&mut self, index: usize) -> bool {
        let Some(src) = self.rows.get(index) else {
            return false;
        };

        let mut copy = src.clone();
        let stem: String = copy.identifier().chars().take(5).collect();
        copy.set_identifier(&format!("{stem}X"));
        self.rows.push(copy);
        self.modified = true;
        true
    }

    /// Delete a row. Sentinel rows are protected.
    pub fn delete_row(&mut self, index: usize) -> bool {
        match self.rows.get(index) {
            Some(row) if !row.is_sentinel() => {
                self.rows.remove(index);
                self.modified = true;
                true
            }
            Some(row) => {
                debug!("Refusing to delete sentinel row {}", row.identifier());
                false
            }
            None => false,
        }
    }

    /// Set one parameter value. Sentinel rows are read-only.
    pub fn set_param(&mut self, index: usize, param_idx: usize, value: f64) -> bool {
        match self.rows.get_mut(index) {
            Some(row) if !row.is_sentinel() => match row.params_mut().get_mut(param_idx) {
                Some(slot) => {
                    *slot = value;
                    self.modified = true;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Apply a field-level edit to a non-sentinel row. The closure gets
    /// mutable access; width truncation is the row type's concern.
    pub fn edit_row(&mut self, index: usize, edit: impl FnOnce(&mut R)) -> bool {
        match self.rows.get_mut(index) {
            Some(row) if !row.is_sentinel() => {
                edit(row);
                self.modified = true;
                true
            }
            _ => false,
        }
    }
}
