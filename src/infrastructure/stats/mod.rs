pub mod pearson;

use crate::domain::error::Result;
use crate::domain::test_result::ChiSquareOutcome;

pub use pearson::PearsonChiSquare;

/// Test of independence over an r×c table of observed counts
pub trait IndependenceTest {
    fn test(&self, observed: &[Vec<f64>]) -> Result<ChiSquareOutcome>;
}
