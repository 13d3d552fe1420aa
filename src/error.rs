use thiserror::Error;

use crate::arrays::DenseTimesError;
use crate::parameters::{BoundsError, ParameterError, PriorError};
use crate::seds::SedError;

/// Error types for the lcfit-rs library.
#[derive(Error, Debug)]
pub enum FitError {
    /// Error raised while constructing or evaluating a parameter.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// Error for invalid parameter ranges.
    #[error("Bounds error: {0}")]
    Bounds(#[from] BoundsError),

    /// Error for invalid prior definitions.
    #[error("Prior error: {0}")]
    Prior(#[from] PriorError),

    /// Error during SED evaluation.
    #[error("SED error: {0}")]
    Sed(#[from] SedError),

    /// Error while building a dense time grid.
    #[error("Dense times error: {0}")]
    DenseTimes(#[from] DenseTimesError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error for cases that don't fit the other categories.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for lcfit-rs operations.
pub type Result<T> = std::result::Result<T, FitError>;

impl From<String> for FitError {
    fn from(s: String) -> Self {
        FitError::Other(s)
    }
}

impl From<&str> for FitError {
    fn from(s: &str) -> Self {
        FitError::Other(s.to_string())
    }
}
