// ============================================================
// CHI-SQUARE USE CASE
// ============================================================
// decode -> clean -> validate -> compute -> shape

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::application::use_cases::table_cleaner::clean_table;
use crate::application::use_cases::table_validator::validate_table;
use crate::domain::error::Result;
use crate::domain::table::{CleaningSummary, TableFormat};
use crate::domain::test_result::TestResult;
use crate::infrastructure::stats::IndependenceTest;
use crate::infrastructure::table::decode_table;

/// Result of analysing an uploaded file
#[derive(Debug, Clone, Serialize)]
pub struct UploadAnalysis {
    pub cleaning: CleaningSummary,
    pub result: TestResult,
}

pub struct ChiSquareUseCase {
    test: Arc<dyn IndependenceTest + Send + Sync>,
}

impl ChiSquareUseCase {
    pub fn new(test: Arc<dyn IndependenceTest + Send + Sync>) -> Self {
        Self { test }
    }

    /// Run the test over a matrix supplied as-is, without cleaning
    pub fn analyze_matrix(&self, observed: &[Vec<f64>]) -> Result<TestResult> {
        let outcome = self.test.test(observed)?;
        Ok(TestResult::from(outcome))
    }

    /// Full upload pipeline. Fails with `UnsupportedFormat` before touching the bytes.
    pub fn analyze_upload(&self, filename: &str, bytes: &[u8]) -> Result<UploadAnalysis> {
        let format = TableFormat::from_filename(filename)?;
        let raw = decode_table(format, bytes)?;
        let (table, cleaning) = clean_table(&raw);

        if cleaning.zero_filled_cells > 0 {
            warn!(
                filename,
                zero_filled_cells = cleaning.zero_filled_cells,
                "Non-numeric cells inside retained rows/columns were replaced by zero"
            );
        }

        validate_table(&table)?;

        let result = self.analyze_matrix(table.rows())?;

        info!(
            filename,
            ?format,
            rows = table.n_rows(),
            cols = table.n_cols(),
            dropped_rows = cleaning.dropped_rows,
            dropped_columns = cleaning.dropped_columns,
            p_value = result.p_value,
            "Upload analysed"
        );

        Ok(UploadAnalysis {
            cleaning,
            result,
        })
    }
}
