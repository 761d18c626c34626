//! CEK Labs Core - Rust Engine
//!
//! Deterministic synthetic datasets for classroom virtual labs.
//!
//! # Architecture
//!
//! - **rng**: Deterministic random number generation and seed derivation
//! - **core**: Physical constants
//! - **models**: Domain types (DataPoint, Dataset, Metadata)
//! - **labs**: Lab generators (surface adsorption, crystal violet,
//!   bomb calorimetry, statistics)
//! - **error**: Configuration and validation errors
//!
//! # Critical Invariants
//!
//! 1. Generated data is a pure function of (lab, student ID, parameters)
//! 2. All randomness is deterministic (seeded RNG, no global state)
//! 3. The library never prints; diagnostics go through `tracing`
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod core;
pub mod error;
pub mod labs;
pub mod models;
pub mod rng;

// Re-exports for convenience
pub use error::{ConfigurationError, LabError, ValidationError};
pub use labs::{
    new_lab, parse_student_id, BombCalorimetry, BombCalorimetryConfig, CombustionSample,
    CrystalViolet, CrystalVioletConfig, LabGenerator, LabKind, LabParameters, StatisticsConfig,
    StatisticsExercise, StatisticsLab, SurfaceAdsorption, SurfaceAdsorptionConfig, Volumes,
};
pub use models::{DataPoint, Dataset, Metadata, Precision};
pub use rng::SeededRandom;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn cek_labs_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::lab::PyLab>()?;
    Ok(())
}
