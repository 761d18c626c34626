//! PyO3 wrapper for lab generators
//!
//! This module provides the Python interface to the Rust labs.

use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict};

use super::types::{lab_error_to_py, parse_lab_parameters};
use crate::error::{ConfigurationError, LabError};
use crate::labs::{new_lab, LabGenerator, LabKind};

/// Python wrapper for any lab generator
///
/// # Example (from Python)
///
/// ```python
/// from cek_labs_core import Lab
///
/// lab = Lab("crystal-violet")
/// lab.set_student_id(123456)
/// lab.set_parameters({"volumes": {"cv": 10, "oh": 10, "h2o": 10}, "temperature": 298.15})
/// data = lab.create_data_for_lab()
/// print(lab.write_data_to_string())
/// ```
#[pyclass(name = "Lab")]
pub struct PyLab {
    inner: Box<dyn LabGenerator + Send>,
}

#[pymethods]
impl PyLab {
    /// Create a lab by name
    ///
    /// # Errors
    ///
    /// Raises ValueError for an unknown lab name
    #[new]
    fn new(kind: &str) -> PyResult<Self> {
        let kind: LabKind = kind
            .parse()
            .map_err(|e: ConfigurationError| lab_error_to_py(LabError::from(e)))?;
        Ok(PyLab {
            inner: new_lab(kind),
        })
    }

    /// Set the student ID from an int or a digit string
    fn set_student_id(&mut self, student_id: &Bound<'_, PyAny>) -> PyResult<()> {
        // bool is a subclass of int in Python; True is not an ID
        if student_id.is_instance_of::<PyBool>() {
            return Err(PyTypeError::new_err("student_ID must be an integer, got bool"));
        }
        if let Ok(id) = student_id.extract::<u64>() {
            self.inner.set_student_id(id);
            return Ok(());
        }
        match student_id.extract::<String>() {
            Ok(raw) => self.inner.set_student_id_str(&raw).map_err(lab_error_to_py),
            Err(_) => Err(PyTypeError::new_err("student_ID must be an integer")),
        }
    }

    #[getter]
    fn student_id(&self) -> Option<u64> {
        self.inner.student_id()
    }

    /// Configure the lab from a dict of parameters
    fn set_parameters(&mut self, params: &Bound<'_, PyDict>) -> PyResult<()> {
        let params = parse_lab_parameters(params)?;
        self.inner.set_parameters(&params).map_err(lab_error_to_py)
    }

    /// Generate the dataset as a list of (x, y) tuples
    fn create_data_for_lab(&self) -> PyResult<Vec<(f64, f64)>> {
        let dataset = self.inner.create_data_for_lab().map_err(lab_error_to_py)?;
        Ok(dataset.points().iter().map(|&p| p.into()).collect())
    }

    /// Header-less CSV rows
    fn write_data_to_string(&self) -> PyResult<String> {
        self.inner.write_data_to_string().map_err(lab_error_to_py)
    }

    /// Column header, CSV rows and `# Key = value` metadata
    fn write_data_document(&self) -> PyResult<String> {
        let dataset = self.inner.create_data_for_lab().map_err(lab_error_to_py)?;
        Ok(dataset.to_csv_document())
    }

    /// Metadata of the dataset as (key, value) pairs
    fn metadata(&self) -> PyResult<Vec<(String, String)>> {
        let dataset = self.inner.create_data_for_lab().map_err(lab_error_to_py)?;
        Ok(dataset
            .metadata()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }

    #[getter]
    fn columns(&self) -> Vec<String> {
        self.inner.columns().iter().map(|c| c.to_string()).collect()
    }

    fn available_samples(&self) -> Vec<String> {
        self.inner
            .available_samples()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn __str__(&self) -> String {
        format!("CEK Lab: {}", self.inner.kind().laboratory_name())
    }
}
