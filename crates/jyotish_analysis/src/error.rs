//! Error types for chart analysis.

use jyotish_base::ChartError;
use thiserror::Error;

/// Errors from the analysis layer.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    /// Construction input is neither a mapping nor a chart data container.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ChartError),
    /// A collaborator or the engine configuration broke its contract.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A derivation referenced a graha or point absent from its dataset.
    #[error("lookup failure: {0}")]
    Lookup(String),
    /// The varga provider has no computation for the identifier.
    #[error("unknown varga: {0}")]
    UnknownVarga(String),
}
