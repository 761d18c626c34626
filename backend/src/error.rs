//! Error types for lab configuration and data generation
//!
//! Two families of failures exist:
//! - [`ConfigurationError`]: something the caller has not provided yet
//!   (student ID, a required parameter) or names something unknown.
//! - [`ValidationError`]: a value was provided but has the wrong type or
//!   lies outside the range the lab model accepts.
//!
//! Both are wrapped by [`LabError`], which is what every generator returns.

use thiserror::Error;

/// Missing or unknown configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("student ID required")]
    StudentIdRequired,

    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("unknown sample '{sample}' for {lab}")]
    UnknownSample { lab: String, sample: String },

    #[error("unknown lab '{0}'")]
    UnknownLab(String),
}

/// Provided value is malformed or out of range
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("seed must be an integer, got '{0}'")]
    InvalidSeed(String),

    #[error("student ID must be an integer, got '{0}'")]
    InvalidStudentId(String),

    #[error("parameter '{name}' must be {expected}")]
    WrongType { name: String, expected: &'static str },

    #[error("parameter '{name}' is out of range: {reason}")]
    OutOfRange { name: String, reason: String },

    #[error("invalid sampling request: {0}")]
    InvalidSampling(String),
}

impl ValidationError {
    pub(crate) fn out_of_range(name: &str, reason: impl Into<String>) -> Self {
        ValidationError::OutOfRange {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Any failure surfaced by a lab generator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}
