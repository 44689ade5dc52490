//! Error types for chart data handling.

use thiserror::Error;

/// Errors raised while reading or validating a natal dataset.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// The raw input was not a mapping (JSON object).
    #[error("chart data must be a mapping, got {0}")]
    NotAMapping(&'static str),
    /// The mapping did not have the expected structure.
    #[error("malformed chart data: {0}")]
    Shape(String),
    /// The input text was not valid JSON.
    #[error("chart data is not valid JSON: {0}")]
    Parse(String),
    /// A positional field is outside its legal range.
    #[error("{key}.{field} out of range: {value}")]
    OutOfRange {
        key: String,
        field: &'static str,
        value: f64,
    },
}
