// ============================================================
// CELL
// ============================================================
// A single decoded value, before numeric coercion

use serde::{Deserialize, Serialize};

/// Untyped cell as it came out of a CSV record or worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Build a cell from a raw text token, keeping blanks distinct from text
    pub fn from_token(token: &str) -> Self {
        if token.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(token.to_string())
        }
    }

    /// Coerce to a finite number; anything else is a missing marker
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) if value.is_finite() => Some(*value),
            Cell::Number(_) => None,
            Cell::Text(text) => parse_numeric(text),
            Cell::Empty => None,
        }
    }
}

/// Parse a trimmed token as a finite `f64`
pub fn parse_numeric(token: &str) -> Option<f64> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}
