//! Type conversion utilities for FFI boundary
//!
//! Converts Python dicts and scalars into `LabParameters` and Rust errors
//! into Python exceptions.

use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict};
use serde_json::{Number, Value};

use crate::error::LabError;
use crate::labs::LabParameters;

/// Convert a Python dict into lab parameters
///
/// Nested dicts (e.g. `volumes`) become nested JSON objects.
///
/// # Errors
///
/// Returns PyErr if:
/// - A key is not a string
/// - A value is not None, bool, int, float, str or dict
/// - A float is NaN or infinite
pub fn parse_lab_parameters(dict: &Bound<'_, PyDict>) -> PyResult<LabParameters> {
    let mut params = LabParameters::new();
    for (key, value) in dict.iter() {
        let key: String = key.extract().map_err(|_| {
            PyTypeError::new_err(format!("parameter names must be strings, got {}", key))
        })?;
        let value = py_to_json(&key, &value)?;
        params.insert(key, value);
    }
    Ok(params)
}

fn py_to_json(key: &str, value: &Bound<'_, PyAny>) -> PyResult<Value> {
    if value.is_none() {
        return Ok(Value::Null);
    }
    if let Ok(dict) = value.downcast::<PyDict>() {
        return Ok(Value::Object(parse_lab_parameters(dict)?));
    }
    // bool is a subclass of int in Python; check it first
    if value.is_instance_of::<PyBool>() {
        return Ok(Value::Bool(value.extract()?));
    }
    if let Ok(int) = value.extract::<u64>() {
        return Ok(Value::from(int));
    }
    if let Ok(int) = value.extract::<i64>() {
        return Ok(Value::from(int));
    }
    if let Ok(float) = value.extract::<f64>() {
        return Number::from_f64(float).map(Value::Number).ok_or_else(|| {
            PyValueError::new_err(format!("parameter '{}' must be a finite number", key))
        });
    }
    if let Ok(text) = value.extract::<String>() {
        return Ok(Value::String(text));
    }
    Err(PyTypeError::new_err(format!(
        "unsupported value for parameter '{}'",
        key
    )))
}

/// Convert a lab error into a Python `ValueError`
pub fn lab_error_to_py(err: LabError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
