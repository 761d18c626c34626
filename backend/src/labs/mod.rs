//! Virtual lab data generators
//!
//! Each lab turns a student ID plus a handful of experimental parameters
//! into a synthetic dataset. The student gets the same file every time they
//! ask, and a classmate with another ID gets a different one.
//!
//! # Lab Interface
//!
//! All labs implement the [`LabGenerator`] trait:
//! ```rust
//! use cek_labs_core::labs::{new_lab, LabKind, LabParameters};
//! use serde_json::json;
//!
//! let mut lab = new_lab(LabKind::CrystalViolet);
//! lab.set_student_id(123456);
//!
//! let params: LabParameters = json!({
//!     "volumes": {"cv": 10, "oh": 10, "h2o": 10},
//!     "temperature": 298.15,
//! })
//! .as_object()
//! .cloned()
//! .unwrap();
//! lab.set_parameters(&params).unwrap();
//!
//! let data = lab.create_data_for_lab().unwrap();
//! assert!(data.first().unwrap().y > data.last().unwrap().y);
//! ```
//!
//! # Seeding
//!
//! Every call to `create_data_for_lab` builds a fresh [`SeededRandom`] from
//! `derive_seed(student_id, kind.salt())`. Repeated calls with unchanged
//! configuration therefore return identical datasets.
//!
//! Available labs:
//! 1. **SurfaceAdsorption**: Langmuir isotherm of a dye on a surface
//! 2. **CrystalViolet**: Pseudo-first-order fading of crystal violet
//! 3. **BombCalorimetry**: Temperature trace of a combustion calorimeter
//! 4. **StatisticsLab**: Small datasets for statistics exercises

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ConfigurationError, LabError, ValidationError};
use crate::models::{Dataset, Metadata};
use crate::rng::{derive_seed, SeededRandom};

pub mod bomb_calorimetry;
pub mod crystal_violet;
pub mod params;
pub mod sampling;
pub mod statistics;
pub mod surface_adsorption;

pub use bomb_calorimetry::{BombCalorimetry, BombCalorimetryConfig, CombustionSample};
pub use crystal_violet::{CrystalViolet, CrystalVioletConfig, Volumes};
pub use params::LabParameters;
pub use statistics::{StatisticsConfig, StatisticsExercise, StatisticsLab};
pub use surface_adsorption::{SurfaceAdsorption, SurfaceAdsorptionConfig};

/// The four lab variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabKind {
    #[serde(rename = "surface-adsorption")]
    SurfaceAdsorption,
    #[serde(rename = "crystal-violet")]
    CrystalViolet,
    #[serde(rename = "bomb-calorimetry")]
    BombCalorimetry,
    #[serde(rename = "statistics")]
    StatisticsLab,
}

impl LabKind {
    pub const ALL: [LabKind; 4] = [
        LabKind::SurfaceAdsorption,
        LabKind::CrystalViolet,
        LabKind::BombCalorimetry,
        LabKind::StatisticsLab,
    ];

    /// Short identifier, also used as the seed salt
    pub fn as_str(&self) -> &'static str {
        match self {
            LabKind::SurfaceAdsorption => "surface-adsorption",
            LabKind::CrystalViolet => "crystal-violet",
            LabKind::BombCalorimetry => "bomb-calorimetry",
            LabKind::StatisticsLab => "statistics",
        }
    }

    /// Salt mixed into the student seed
    ///
    /// Fixed forever: changing it changes every student's dataset.
    pub fn salt(&self) -> &'static str {
        self.as_str()
    }

    /// Name written into dataset metadata
    pub fn laboratory_name(&self) -> &'static str {
        match self {
            LabKind::SurfaceAdsorption => "Surface Adsorption Lab",
            LabKind::CrystalViolet => "Crystal Violet Lab",
            LabKind::BombCalorimetry => "Bomb Calorimetry",
            LabKind::StatisticsLab => "Basic Statistics Lab",
        }
    }
}

impl fmt::Display for LabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        LabKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ConfigurationError::UnknownLab(s.to_string()))
    }
}

/// Common interface of every lab generator
///
/// Object safe, so front ends can hold a `Box<dyn LabGenerator>` chosen at
/// runtime via [`new_lab`].
pub trait LabGenerator {
    fn kind(&self) -> LabKind;

    /// Column names of the generated data, independent variable first
    fn columns(&self) -> [&'static str; 2];

    fn set_student_id(&mut self, student_id: u64);

    fn student_id(&self) -> Option<u64>;

    /// Set the student ID from user-entered text
    fn set_student_id_str(&mut self, raw: &str) -> Result<(), LabError> {
        let id = parse_student_id(raw)?;
        self.set_student_id(id);
        Ok(())
    }

    /// Configure the lab from loosely typed parameters
    ///
    /// Unrecognized keys are ignored. A missing required key is a
    /// `ConfigurationError`; a bad value is a `ValidationError`. On error
    /// the previous configuration stays in place.
    fn set_parameters(&mut self, params: &LabParameters) -> Result<(), LabError>;

    /// Generate the dataset for the configured student
    fn create_data_for_lab(&self) -> Result<Dataset, LabError>;

    /// Header-less CSV of the dataset, one row per point
    fn write_data_to_string(&self) -> Result<String, LabError> {
        Ok(self.create_data_for_lab()?.to_csv())
    }

    /// Accepted values of the `sample` parameter, if the lab has one
    fn available_samples(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Build a lab generator of the given kind
pub fn new_lab(kind: LabKind) -> Box<dyn LabGenerator + Send> {
    match kind {
        LabKind::SurfaceAdsorption => Box::new(SurfaceAdsorption::new()),
        LabKind::CrystalViolet => Box::new(CrystalViolet::new()),
        LabKind::BombCalorimetry => Box::new(BombCalorimetry::new()),
        LabKind::StatisticsLab => Box::new(StatisticsLab::new()),
    }
}

/// Parse a student ID typed by a user
///
/// Surrounding whitespace is ignored; anything but ASCII digits is rejected.
///
/// # Example
/// ```
/// use cek_labs_core::labs::parse_student_id;
///
/// assert_eq!(parse_student_id(" 123456 "), Ok(123456));
/// assert!(parse_student_id("12a").is_err());
/// ```
pub fn parse_student_id(raw: &str) -> Result<u64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidStudentId(raw.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidStudentId(raw.to_string()))
}

/// Student ID and typed configuration held by every lab
#[derive(Debug, Clone)]
pub(crate) struct LabSession<C> {
    student_id: Option<u64>,
    config: Option<C>,
}

impl<C> Default for LabSession<C> {
    fn default() -> Self {
        Self {
            student_id: None,
            config: None,
        }
    }
}

impl<C> LabSession<C> {
    pub(crate) fn student_id(&self) -> Option<u64> {
        self.student_id
    }

    pub(crate) fn set_student_id(&mut self, student_id: u64) {
        self.student_id = Some(student_id);
    }

    pub(crate) fn config(&self) -> Option<&C> {
        self.config.as_ref()
    }

    pub(crate) fn set_config(&mut self, config: C) {
        self.config = Some(config);
    }

    /// Student ID and configuration, or the first thing still missing
    ///
    /// `required_key` names the parameter reported when no configuration
    /// has been set.
    pub(crate) fn ready(&self, required_key: &str) -> Result<(u64, &C), ConfigurationError> {
        let student_id = self
            .student_id
            .ok_or(ConfigurationError::StudentIdRequired)?;
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| ConfigurationError::MissingParameter(required_key.to_string()))?;
        Ok((student_id, config))
    }
}

/// Fresh generator for one student in one lab
pub(crate) fn seeded_rng(kind: LabKind, student_id: u64) -> SeededRandom {
    let seed = derive_seed(student_id, kind.salt());
    trace!(lab = %kind, student_id, seed, "seeding lab generator");
    SeededRandom::new(seed)
}

/// Metadata entries every dataset starts with
pub(crate) fn base_metadata(kind: LabKind, student_id: u64, number_of_values: usize) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("Laboratory", kind.laboratory_name());
    metadata.insert("Student ID", student_id);
    metadata.insert("Number of values", number_of_values);
    metadata
}
