//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings exposing the lab generators to Python.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: One `Lab` class wraps any generator
//! 2. **Simple types**: Ints, strings, dicts and lists of tuples at the boundary
//! 3. **Validate inputs**: Python values become `LabParameters` before any lab sees them
//! 4. **Safe errors**: All Rust errors become Python exceptions
//! 5. **No references**: Python gets copies of generated data

pub mod lab;
pub mod types;
