// ============================================================
// CONTINGENCY TABLE
// ============================================================
// Cleaned, rectangular numeric matrix handed to the independence test

use serde::{Deserialize, Serialize};

/// Rectangular matrix of finite numbers with no fully-empty row or column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContingencyTable {
    rows: Vec<Vec<f64>>,
}

impl ContingencyTable {
    /// Wrap rows produced by the cleaner. Callers guarantee equal row lengths.
    pub(crate) fn from_clean_rows(rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(rows.windows(2).all(|pair| pair[0].len() == pair[1].len()));
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn has_negative(&self) -> bool {
        self.rows.iter().flatten().any(|value| *value < 0.0)
    }
}

/// What the cleaner dropped and filled on the way to a `ContingencyTable`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub dropped_rows: usize,
    pub dropped_columns: usize,
    /// Non-numeric cells inside retained rows and columns, replaced by zero
    pub zero_filled_cells: usize,
}
