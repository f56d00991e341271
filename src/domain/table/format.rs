// ============================================================
// TABLE FORMAT
// ============================================================
// Upload format, picked from the file extension only

use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    Csv,
    Excel,
}

impl TableFormat {
    /// Resolve the decoder for `filename`; extension match ignores case
    pub fn from_filename(filename: &str) -> Result<Self> {
        let name = filename.trim().to_ascii_lowercase();
        if name.ends_with(".csv") {
            Ok(TableFormat::Csv)
        } else if name.ends_with(".xlsx") || name.ends_with(".xls") {
            Ok(TableFormat::Excel)
        } else {
            Err(AppError::UnsupportedFormat)
        }
    }
}
