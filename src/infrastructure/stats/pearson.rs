use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::debug;

use super::IndependenceTest;
use crate::domain::error::{AppError, Result};
use crate::domain::test_result::ChiSquareOutcome;

/// Pearson's chi-square test of independence
#[derive(Debug, Clone, Copy)]
pub struct PearsonChiSquare {
    /// Apply Yates' continuity correction to tables with one degree of freedom
    yates_correction: bool,
}

impl Default for PearsonChiSquare {
    fn default() -> Self {
        Self {
            yates_correction: true,
        }
    }
}

impl PearsonChiSquare {
    pub fn new(yates_correction: bool) -> Self {
        Self { yates_correction }
    }
}

impl IndependenceTest for PearsonChiSquare {
    fn test(&self, observed: &[Vec<f64>]) -> Result<ChiSquareOutcome> {
        let n_cols = check_shape(observed)?;
        let n_rows = observed.len();

        let mut row_sums = vec![0.0; n_rows];
        let mut col_sums = vec![0.0; n_cols];
        for (i, row) in observed.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                row_sums[i] += value;
                col_sums[j] += value;
            }
        }
        let total: f64 = row_sums.iter().sum();
        if !(total > 0.0 && total.is_finite()) {
            return Err(AppError::Computation(format!(
                "The sum of `observed` must be positive and finite, got {}.",
                total
            )));
        }

        let expected: Vec<Vec<f64>> = row_sums
            .iter()
            .map(|row_sum| {
                col_sums
                    .iter()
                    .map(|col_sum| row_sum * col_sum / total)
                    .collect()
            })
            .collect();

        if expected.iter().flatten().any(|value| !value.is_finite()) {
            return Err(AppError::Computation(
                "The internally computed table of expected frequencies is not finite.".to_string(),
            ));
        }
        if let Some((i, j)) = first_zero(&expected) {
            return Err(AppError::Computation(format!(
                "The internally computed table of expected frequencies has a zero element at ({}, {}).",
                i, j
            )));
        }

        let dof = (n_rows - 1) * (n_cols - 1);
        if dof == 0 {
            return Ok(ChiSquareOutcome {
                statistic: 0.0,
                p_value: 1.0,
                dof,
                expected_frequencies: expected,
            });
        }

        let correct = self.yates_correction && dof == 1;
        let mut statistic = 0.0;
        for (observed_row, expected_row) in observed.iter().zip(expected.iter()) {
            for (&o, &e) in observed_row.iter().zip(expected_row.iter()) {
                let o = if correct {
                    let diff = e - o;
                    o + diff.abs().min(0.5).copysign(diff)
                } else {
                    o
                };
                let d = o - e;
                statistic += d * d / e;
            }
        }

        if !statistic.is_finite() {
            return Err(AppError::Computation(
                "The chi-square statistic overflowed; counts are too large.".to_string(),
            ));
        }

        let p_value = chi2_sf(statistic, dof)?;
        debug!(statistic, p_value, dof, yates = correct, "chi-square computed");

        Ok(ChiSquareOutcome {
            statistic,
            p_value,
            dof,
            expected_frequencies: expected,
        })
    }
}

/// Returns the column count of a non-empty, rectangular, finite, non-negative table
fn check_shape(observed: &[Vec<f64>]) -> Result<usize> {
    let n_cols = observed.first().map(Vec::len).unwrap_or(0);
    if n_cols == 0 {
        return Err(AppError::Computation(
            "No data; `observed` has size 0.".to_string(),
        ));
    }
    if let Some((i, row)) = observed
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != n_cols)
    {
        return Err(AppError::Computation(format!(
            "`observed` must be rectangular: row {} has {} columns, expected {}.",
            i,
            row.len(),
            n_cols
        )));
    }
    if observed.iter().flatten().any(|value| !value.is_finite()) {
        return Err(AppError::Computation(
            "All values in `observed` must be finite.".to_string(),
        ));
    }
    if observed.iter().flatten().any(|value| *value < 0.0) {
        return Err(AppError::Computation(
            "All values in `observed` must be nonnegative.".to_string(),
        ));
    }
    Ok(n_cols)
}

fn first_zero(expected: &[Vec<f64>]) -> Option<(usize, usize)> {
    expected.iter().enumerate().find_map(|(i, row)| {
        row.iter()
            .position(|value| *value == 0.0)
            .map(|j| (i, j))
    })
}

fn chi2_sf(statistic: f64, dof: usize) -> Result<f64> {
    let dist = ChiSquared::new(dof as f64).map_err(|e| {
        AppError::Computation(format!("Invalid chi-square distribution: {}", e))
    })?;
    Ok(dist.sf(statistic).clamp(0.0, 1.0))
}
