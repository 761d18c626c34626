//! Domain models for generated lab data

pub mod dataset;
pub mod metadata;

// Re-exports
pub use dataset::{DataPoint, Dataset, Precision};
pub use metadata::Metadata;
