//! Parameter extraction for lab configuration
//!
//! Labs receive their options as a JSON object (`LabParameters`), the shape
//! every front end already has at hand. These helpers turn that loose map
//! into typed configuration records with clear error messages:
//!
//! - [`extract_required`]: missing key → `ConfigurationError::MissingParameter`
//! - [`extract_optional`]: missing key → `None`
//! - [`extract_with_default`]: missing key → the supplied default
//!
//! In all three a present value of the wrong type is a `ValidationError`.
//! Keys the lab does not recognize are never looked at, so they are ignored.
//! A JSON `null` counts as missing.

use std::str::FromStr;

use serde_json::Value;

use crate::error::{ConfigurationError, LabError, ValidationError};

/// Largest dataset a lab will generate
pub const MAX_VALUES: usize = 100_000;

/// Loosely typed lab options, keyed by parameter name
pub type LabParameters = serde_json::Map<String, Value>;

/// Conversion from one JSON parameter value
pub trait FromParameter: Sized {
    fn from_parameter(name: &str, value: &Value) -> Result<Self, LabError>;
}

impl FromParameter for f64 {
    fn from_parameter(name: &str, value: &Value) -> Result<Self, LabError> {
        let number = value.as_f64().ok_or_else(|| wrong_type(name, "a number"))?;
        if !number.is_finite() {
            return Err(wrong_type(name, "a finite number").into());
        }
        Ok(number)
    }
}

impl FromParameter for usize {
    fn from_parameter(name: &str, value: &Value) -> Result<Self, LabError> {
        value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| wrong_type(name, "a non-negative integer").into())
    }
}

impl FromParameter for String {
    fn from_parameter(name: &str, value: &Value) -> Result<Self, LabError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| wrong_type(name, "a string").into())
    }
}

/// Extract a required parameter
///
/// # Example
/// ```
/// use cek_labs_core::labs::params::{extract_required, LabParameters};
/// use serde_json::json;
///
/// let params: LabParameters = json!({"temperature": 298.15}).as_object().unwrap().clone();
/// let t: f64 = extract_required(&params, "temperature").unwrap();
/// assert_eq!(t, 298.15);
/// assert!(extract_required::<f64>(&params, "volume").is_err());
/// ```
pub fn extract_required<T: FromParameter>(
    params: &LabParameters,
    key: &str,
) -> Result<T, LabError> {
    let value = lookup(params, key)
        .ok_or_else(|| ConfigurationError::MissingParameter(key.to_string()))?;
    T::from_parameter(key, value)
}

/// Extract an optional parameter
pub fn extract_optional<T: FromParameter>(
    params: &LabParameters,
    key: &str,
) -> Result<Option<T>, LabError> {
    lookup(params, key)
        .map(|value| T::from_parameter(key, value))
        .transpose()
}

/// Extract a parameter, falling back to `default` when absent
pub fn extract_with_default<T: FromParameter>(
    params: &LabParameters,
    key: &str,
    default: T,
) -> Result<T, LabError> {
    Ok(extract_optional(params, key)?.unwrap_or(default))
}

/// Extract a nested JSON object
pub fn extract_object<'a>(
    params: &'a LabParameters,
    key: &str,
) -> Result<&'a LabParameters, LabError> {
    lookup(params, key)
        .ok_or_else(|| ConfigurationError::MissingParameter(key.to_string()))?
        .as_object()
        .ok_or_else(|| wrong_type(key, "an object").into())
}

/// Parse a named sample from its string value
///
/// Unknown names are a configuration problem (the lab has no such sample),
/// not a type problem.
pub(crate) fn parse_sample<T: FromStr>(lab: &str, name: &str) -> Result<T, ConfigurationError> {
    name.parse().map_err(|_| ConfigurationError::UnknownSample {
        lab: lab.to_string(),
        sample: name.to_string(),
    })
}

pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(
            name,
            format!("must be positive, got {}", value),
        ))
    }
}

pub(crate) fn ensure_non_negative(name: &str, value: f64) -> Result<(), ValidationError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(
            name,
            format!("must not be negative, got {}", value),
        ))
    }
}

pub(crate) fn ensure_count(name: &str, value: usize) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::out_of_range(name, "must be at least 1"));
    }
    if value > MAX_VALUES {
        return Err(ValidationError::out_of_range(
            name,
            format!("must not exceed {}, got {}", MAX_VALUES, value),
        ));
    }
    Ok(())
}

fn lookup<'a>(params: &'a LabParameters, key: &str) -> Option<&'a Value> {
    params.get(key).filter(|value| !value.is_null())
}

fn wrong_type(name: &str, expected: &'static str) -> ValidationError {
    ValidationError::WrongType {
        name: name.to_string(),
        expected,
    }
}
