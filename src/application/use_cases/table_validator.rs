use crate::domain::error::{AppError, Result};
use crate::domain::table::ContingencyTable;

pub const MIN_ROWS: usize = 2;
pub const MIN_COLS: usize = 2;

/// Reject cleaned tables that cannot be tested. Size is checked before sign.
pub fn validate_table(table: &ContingencyTable) -> Result<()> {
    if table.n_rows() < MIN_ROWS || table.n_cols() < MIN_COLS {
        return Err(AppError::TooSmall);
    }
    if table.has_negative() {
        return Err(AppError::NegativeValue);
    }
    Ok(())
}
