// ============================================================
// RAW TABLE
// ============================================================
// Decoded upload with no header interpretation

use super::Cell;

/// Rows of untyped cells; row 0 is data like any other
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Build a table, padding short rows with `Cell::Empty` to the widest row
    pub fn from_rows(mut rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in rows.iter_mut() {
            row.resize(width, Cell::Empty);
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }
}
