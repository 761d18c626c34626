//! Basic statistics lab
//!
//! Ten-point datasets for the statistics exercises of the course. Some
//! exercises need two independent normal samples (averages, propagation of
//! uncertainty, t-tests), others need noisy (x, y) data for regression or
//! outlier detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::params::{extract_required, parse_sample, LabParameters};
use super::sampling::{round_to, sample_curve, CurveSpec, XSpacing};
use super::{base_metadata, seeded_rng, LabGenerator, LabKind, LabSession};
use crate::error::LabError;
use crate::models::{DataPoint, Dataset, Precision};
use crate::rng::SeededRandom;

/// Every exercise produces exactly this many points
pub const NUMBER_OF_VALUES: usize = 10;

const PRECISION: Precision = Precision::new(3, 3);
const COLUMNS: [&str; 2] = ["X", "Y"];

/// The statistics exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatisticsExercise {
    #[serde(rename = "Averages")]
    Averages,
    #[serde(rename = "Propagation of uncertainty")]
    PropagationOfUncertainty,
    #[serde(rename = "Comparison of averages")]
    ComparisonOfAverages,
    #[serde(rename = "Linear fit")]
    LinearFit,
    #[serde(rename = "Non linear fit")]
    NonLinearFit,
    #[serde(rename = "Detection of outliers")]
    DetectionOfOutliers,
}

/// How an exercise's data is produced
enum Recipe {
    /// Two independent normal columns, (mean, std_dev) each
    NormalColumns([(f64, f64); 2]),
    /// Model curve on random x with Gaussian noise; optionally one point shifted up
    Curve {
        model: fn(f64) -> f64,
        xrange: (f64, f64),
        noise_level: f64,
        outlier_shift: Option<f64>,
    },
}

impl StatisticsExercise {
    pub const ALL: [StatisticsExercise; 6] = [
        StatisticsExercise::Averages,
        StatisticsExercise::PropagationOfUncertainty,
        StatisticsExercise::ComparisonOfAverages,
        StatisticsExercise::LinearFit,
        StatisticsExercise::NonLinearFit,
        StatisticsExercise::DetectionOfOutliers,
    ];

    pub const NAMES: [&'static str; 6] = [
        "Averages",
        "Propagation of uncertainty",
        "Comparison of averages",
        "Linear fit",
        "Non linear fit",
        "Detection of outliers",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatisticsExercise::Averages => "Averages",
            StatisticsExercise::PropagationOfUncertainty => "Propagation of uncertainty",
            StatisticsExercise::ComparisonOfAverages => "Comparison of averages",
            StatisticsExercise::LinearFit => "Linear fit",
            StatisticsExercise::NonLinearFit => "Non linear fit",
            StatisticsExercise::DetectionOfOutliers => "Detection of outliers",
        }
    }

    /// Reference answer recorded in the metadata, when the exercise has one
    pub fn expected_value(&self) -> Option<(f64, f64)> {
        match self {
            StatisticsExercise::Averages => Some((1.0, 10.0)),
            StatisticsExercise::LinearFit => Some((11.3, 0.9)),
            _ => None,
        }
    }

    fn recipe(&self) -> Recipe {
        match self {
            StatisticsExercise::Averages => Recipe::NormalColumns([(1.0, 0.1), (12.0, 2.0)]),
            StatisticsExercise::PropagationOfUncertainty => {
                Recipe::NormalColumns([(15.0, 1.0), (133.0, 2.0)])
            }
            StatisticsExercise::ComparisonOfAverages => {
                Recipe::NormalColumns([(15.0, 1.0), (13.2, 2.0)])
            }
            StatisticsExercise::LinearFit => Recipe::Curve {
                model: |x| 12.3 * x + 1.0,
                xrange: (0.0, 10.0),
                noise_level: 5.0,
                outlier_shift: None,
            },
            StatisticsExercise::NonLinearFit => Recipe::Curve {
                model: equation_of_state,
                xrange: (50.0, 140.0),
                noise_level: 5.0,
                outlier_shift: None,
            },
            StatisticsExercise::DetectionOfOutliers => Recipe::Curve {
                model: |x| 2.3 * x + 0.1,
                xrange: (10.0, 20.0),
                noise_level: 1.0,
                outlier_shift: Some(2.0),
            },
        }
    }
}

/// Murnaghan equation of state, energy against volume
///
/// E0 = −634.2, K0 = 12.43, K0' = 4.28, V0 = 99.11
fn equation_of_state(v: f64) -> f64 {
    const E0: f64 = -634.2;
    const K0: f64 = 12.43;
    const KP: f64 = 4.28;
    const V0: f64 = 99.11;
    E0 + K0 * v / KP * ((V0 / v).powf(KP) / (KP - 1.0) + 1.0) - K0 * V0 / (KP - 1.0)
}

impl fmt::Display for StatisticsExercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatisticsExercise {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatisticsExercise::ALL
            .into_iter()
            .find(|exercise| exercise.as_str() == s)
            .ok_or(())
    }
}

/// Configuration for [`StatisticsLab`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsConfig {
    pub sample: StatisticsExercise,
}

impl StatisticsConfig {
    pub fn new(sample: StatisticsExercise) -> Self {
        Self { sample }
    }

    /// Build from loosely typed parameters; `sample` is required
    pub fn from_parameters(params: &LabParameters) -> Result<Self, LabError> {
        let name: String = extract_required(params, "sample")?;
        let sample = parse_sample(LabKind::StatisticsLab.as_str(), &name)?;
        Ok(Self { sample })
    }
}

/// Statistics lab generator
#[derive(Debug, Clone, Default)]
pub struct StatisticsLab {
    session: LabSession<StatisticsConfig>,
}

impl StatisticsLab {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(&mut self, config: StatisticsConfig) -> Result<(), LabError> {
        self.session.set_config(config);
        Ok(())
    }

    pub fn config(&self) -> Option<&StatisticsConfig> {
        self.session.config()
    }
}

fn normal_columns(rng: &mut SeededRandom, columns: [(f64, f64); 2]) -> Vec<DataPoint> {
    let [(mean_x, sd_x), (mean_y, sd_y)] = columns;
    let xs = rng.normal(mean_x, sd_x, NUMBER_OF_VALUES);
    let ys = rng.normal(mean_y, sd_y, NUMBER_OF_VALUES);
    xs.into_iter()
        .zip(ys)
        .map(|(x, y)| DataPoint::new(round_to(x, PRECISION.x), round_to(y, PRECISION.y)))
        .collect()
}

impl LabGenerator for StatisticsLab {
    fn kind(&self) -> LabKind {
        LabKind::StatisticsLab
    }

    fn columns(&self) -> [&'static str; 2] {
        COLUMNS
    }

    fn set_student_id(&mut self, student_id: u64) {
        self.session.set_student_id(student_id);
    }

    fn student_id(&self) -> Option<u64> {
        self.session.student_id()
    }

    fn set_parameters(&mut self, params: &LabParameters) -> Result<(), LabError> {
        let config = StatisticsConfig::from_parameters(params)
            .inspect_err(|e| debug!(lab = %self.kind(), error = %e, "rejected parameters"))?;
        self.configure(config)
    }

    fn create_data_for_lab(&self) -> Result<Dataset, LabError> {
        let (student_id, config) = self.session.ready("sample")?;
        let mut rng = seeded_rng(self.kind(), student_id);

        let points = match config.sample.recipe() {
            Recipe::NormalColumns(columns) => normal_columns(&mut rng, columns),
            Recipe::Curve {
                model,
                xrange,
                noise_level,
                outlier_shift,
            } => {
                let spec = CurveSpec {
                    nvalues: NUMBER_OF_VALUES,
                    xrange,
                    spacing: XSpacing::Random,
                    noise_level,
                    background: 0.0,
                    positive: false,
                    precision: PRECISION,
                };
                let mut points = sample_curve(&mut rng, &spec, model)?;
                if let Some(shift) = outlier_shift {
                    let index = rng.range(0, NUMBER_OF_VALUES as i64) as usize;
                    let point = &mut points[index];
                    point.y = round_to(point.y + shift, PRECISION.y);
                }
                points
            }
        };

        let mut metadata = base_metadata(self.kind(), student_id, points.len());
        metadata.insert("Sample", config.sample);
        if let Some((a, b)) = config.sample.expected_value() {
            metadata.insert("Expected value", format!("({}, {})", a, b));
        }

        debug!(lab = %self.kind(), student_id, points = points.len(), "generated dataset");
        Ok(Dataset::new(COLUMNS, points, PRECISION, metadata))
    }

    fn available_samples(&self) -> &'static [&'static str] {
        &StatisticsExercise::NAMES
    }
}
