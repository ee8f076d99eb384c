//! Custom error types for envelope-reconcile
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;
use crate::services::split::SplitError;

/// The main error type for envelope-reconcile operations
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed input (amounts, ids, dates)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Split rows do not add up to the transaction amount
    #[error("Splits total {actual} but the transaction amount is {expected}")]
    AmountMismatch { expected: Money, actual: Money },
}

impl EnvelopeError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::AmountMismatch { .. })
    }
}

impl From<std::io::Error> for EnvelopeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EnvelopeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<SplitError> for EnvelopeError {
    fn from(err: SplitError) -> Self {
        match err {
            SplitError::AmountMismatch { expected, actual } => {
                Self::AmountMismatch { expected, actual }
            }
        }
    }
}

/// Result type alias for envelope-reconcile operations
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;
