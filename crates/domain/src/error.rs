//! Unified error types for the domain layer
//!
//! Every failure raised while building or mutating a character record is one of
//! these variants. Errors are returned synchronously to the caller; the domain
//! never recovers from or logs them.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A required field or sub-field resolved to no value
    #[error("Required field missing: {path}")]
    RequiredField { path: String },

    /// A numeric value fell below its declared floor
    #[error("Value out of range: {path} must be at least {min}, got {value}")]
    Range { path: String, min: i64, value: i64 },

    /// A semantic rule beyond type and range was violated
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A value had the wrong JSON type for its field
    #[error("Invalid type for {path}: expected {expected}")]
    InvalidType { path: String, expected: &'static str },

    /// Input could not be parsed as JSON
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Create a required field error for the given dotted field path
    pub fn required(path: impl Into<String>) -> Self {
        Self::RequiredField { path: path.into() }
    }

    /// Creates a range error for a value below its floor.
    ///
    /// # Example
    /// ```ignore
    /// if level < 1 {
    ///     return Err(DomainError::range("level", 1, level));
    /// }
    /// ```
    pub fn range(path: impl Into<String>, min: i64, value: i64) -> Self {
        Self::Range {
            path: path.into(),
            min,
            value,
        }
    }

    /// Creates a validation error for business rule violations.
    ///
    /// Use this when a value has the right type and range but still breaks a
    /// domain rule, e.g. a character name that is blank after trimming.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid type error
    pub fn invalid_type(path: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidType {
            path: path.into(),
            expected,
        }
    }

    /// Dotted path of the offending field, when the error names one
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::RequiredField { path }
            | Self::Range { path, .. }
            | Self::InvalidType { path, .. } => Some(path),
            Self::Validation(_) | Self::Parse(_) => None,
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
