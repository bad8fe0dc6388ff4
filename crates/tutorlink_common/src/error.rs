// --- File: crates/tutorlink_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Tutorlink errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// Each crate can extend this by implementing From<SpecificError> for TutorlinkError.
#[derive(Error, Debug)]
pub enum TutorlinkError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred while reading or writing durable state
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

// Common error conversions
impl From<serde_json::Error> for TutorlinkError {
    fn from(err: serde_json::Error) -> Self {
        TutorlinkError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for TutorlinkError {
    fn from(err: std::io::Error) -> Self {
        TutorlinkError::StorageError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> TutorlinkError {
    TutorlinkError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> TutorlinkError {
    TutorlinkError::ValidationError(message.to_string())
}

pub fn storage_error<T: fmt::Display>(message: T) -> TutorlinkError {
    TutorlinkError::StorageError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> TutorlinkError {
    TutorlinkError::InternalError(message.to_string())
}
