use serde::{Deserialize, Serialize};

/// p-values strictly below this are reported as significant
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

pub const DEPENDENT_LABEL: &str = "Dependencia significativa";
pub const INDEPENDENT_LABEL: &str = "Independencia";

/// Raw output of an independence test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChiSquareOutcome {
    pub statistic: f64,
    pub p_value: f64,
    pub dof: usize,
    pub expected_frequencies: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub statistic: f64,
    pub p_value: f64,
    pub dof: usize,
    pub expected_frequencies: Vec<Vec<f64>>,
    pub is_significant: bool,
    pub interpretation: String,
}

impl From<ChiSquareOutcome> for TestResult {
    fn from(outcome: ChiSquareOutcome) -> Self {
        let is_significant = outcome.p_value < SIGNIFICANCE_LEVEL;
        let interpretation = if is_significant {
            DEPENDENT_LABEL
        } else {
            INDEPENDENT_LABEL
        };
        Self {
            statistic: outcome.statistic,
            p_value: outcome.p_value,
            dof: outcome.dof,
            expected_frequencies: outcome.expected_frequencies,
            is_significant,
            interpretation: interpretation.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(p_value: f64) -> ChiSquareOutcome {
        ChiSquareOutcome {
            statistic: 1.0,
            p_value,
            dof: 1,
            expected_frequencies: vec![vec![1.0, 1.0], vec![1.0, 1.0]],
        }
    }

    #[test]
    fn test_significant_below_threshold() {
        let result = TestResult::from(outcome(0.01));
        assert!(result.is_significant);
        assert_eq!(result.interpretation, "Dependencia significativa");
    }

    #[test]
    fn test_threshold_is_strict() {
        let result = TestResult::from(outcome(0.05));
        assert!(!result.is_significant);
        assert_eq!(result.interpretation, "Independencia");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(TestResult::from(outcome(0.5))).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "dof",
                "expected_frequencies",
                "interpretation",
                "is_significant",
                "p_value",
                "statistic"
            ]
        );
    }
}
