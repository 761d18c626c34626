//! Crystal violet kinetics lab
//!
//! Crystal violet (CV⁺) is decolorized by hydroxide. With hydroxide in large
//! excess the reaction is pseudo-first-order in CV, so the absorbance at
//! 590 nm decays exponentially:
//!
//! ```text
//! A(t) = A0 · exp(−k' t),   k' = k · [OH⁻]^β,   k = A · exp(−Ea / RT)
//! ```
//!
//! Students mix stock solutions by volume, so the pipetted volumes themselves
//! carry a small random error before the concentrations are computed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::params::{
    ensure_count, ensure_non_negative, ensure_positive, extract_object, extract_required,
    extract_with_default, LabParameters,
};
use super::sampling::{sample_curve, CurveSpec, XSpacing};
use super::{base_metadata, seeded_rng, LabGenerator, LabKind, LabSession};
use crate::core::constants::{kelvin_to_celsius, GAS_CONSTANT};
use crate::error::{ConfigurationError, LabError, ValidationError};
use crate::models::{Dataset, Precision};

/// Activation energy (J/mol)
const ACTIVATION_ENERGY: f64 = 63e3;
/// Arrhenius prefactor (1/M/s)
const PREFACTOR: f64 = 5.9e9;
/// Reaction order with respect to hydroxide
const HYDROXIDE_ORDER: f64 = 0.75;
/// Molar absorptivity of CV at 590 nm (L/mol/cm)
const ABSORPTIVITY: f64 = 160e3;
/// Stock concentration of crystal violet (mol/L)
const STOCK_CV: f64 = 2.5e-5;
/// Stock concentration of hydroxide (mol/L)
const STOCK_OH: f64 = 0.5;

const PRECISION: Precision = Precision::new(1, 6);
const COLUMNS: [&str; 2] = ["Time (s)", "Absorbance"];

/// Volumes of the mixed solutions (mL)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volumes {
    pub cv: f64,
    pub oh: f64,
    pub h2o: f64,
}

impl Volumes {
    pub fn new(cv: f64, oh: f64, h2o: f64) -> Self {
        Self { cv, oh, h2o }
    }

    pub fn total(&self) -> f64 {
        self.cv + self.oh + self.h2o
    }

    fn from_parameters(params: &LabParameters) -> Result<Self, LabError> {
        let volumes = extract_object(params, "volumes")?;
        let component = |name: &str| -> Result<f64, LabError> {
            extract_required(volumes, name).map_err(|e| match e {
                LabError::Configuration(_) => {
                    ConfigurationError::MissingParameter(format!("volumes.{}", name)).into()
                }
                other => other,
            })
        };
        Ok(Self {
            cv: component("cv")?,
            oh: component("oh")?,
            h2o: component("h2o")?,
        })
    }
}

/// Configuration for [`CrystalViolet`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrystalVioletConfig {
    pub volumes: Volumes,
    /// Temperature (K)
    pub temperature: f64,
    /// Length of the run (s)
    pub expt_time: f64,
    pub number_of_values: usize,
    /// Standard deviation of absorbance and pipetting noise
    pub noise_level: f64,
    /// Constant absorbance offset of the cuvette
    pub background: f64,
}

impl CrystalVioletConfig {
    pub fn new(volumes: Volumes, temperature: f64) -> Self {
        Self {
            volumes,
            temperature,
            expt_time: 1000.0,
            number_of_values: 501,
            noise_level: 0.05,
            background: 0.01,
        }
    }

    /// Build from loosely typed parameters; `volumes` and `temperature` are required
    pub fn from_parameters(params: &LabParameters) -> Result<Self, LabError> {
        let volumes = Volumes::from_parameters(params)?;
        let defaults = Self::new(volumes, extract_required(params, "temperature")?);
        Ok(Self {
            expt_time: extract_with_default(params, "expt_time", defaults.expt_time)?,
            number_of_values: extract_with_default(
                params,
                "number_of_values",
                defaults.number_of_values,
            )?,
            noise_level: extract_with_default(params, "noise_level", defaults.noise_level)?,
            background: extract_with_default(params, "background", defaults.background)?,
            ..defaults
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        // No dye or no hydroxide means nothing fades
        ensure_positive("volumes.cv", self.volumes.cv)?;
        ensure_positive("volumes.oh", self.volumes.oh)?;
        ensure_non_negative("volumes.h2o", self.volumes.h2o)?;
        ensure_positive("temperature", self.temperature)?;
        ensure_positive("expt_time", self.expt_time)?;
        ensure_non_negative("noise_level", self.noise_level)?;
        ensure_non_negative("background", self.background)?;
        ensure_count("number_of_values", self.number_of_values)
    }
}

/// Second-order rate constant (1/M/s) at `temperature` (K)
pub fn rate_constant(temperature: f64) -> f64 {
    PREFACTOR * (-ACTIVATION_ENERGY / (GAS_CONSTANT * temperature)).exp()
}

/// Crystal violet lab generator
#[derive(Debug, Clone, Default)]
pub struct CrystalViolet {
    session: LabSession<CrystalVioletConfig>,
}

impl CrystalViolet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(&mut self, config: CrystalVioletConfig) -> Result<(), LabError> {
        config.validate()?;
        self.session.set_config(config);
        Ok(())
    }

    pub fn config(&self) -> Option<&CrystalVioletConfig> {
        self.session.config()
    }
}

impl LabGenerator for CrystalViolet {
    fn kind(&self) -> LabKind {
        LabKind::CrystalViolet
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
        let config = CrystalVioletConfig::from_parameters(params)
            .inspect_err(|e| debug!(lab = %self.kind(), error = %e, "rejected parameters"))?;
        self.configure(config)
    }

    fn create_data_for_lab(&self) -> Result<Dataset, LabError> {
        let (student_id, config) = self.session.ready("volumes")?;
        let mut rng = seeded_rng(self.kind(), student_id);

        // Pipetting error on each of the three volumes
        let volumes = config.volumes;
        let total_volume: f64 = [volumes.cv, volumes.oh, volumes.h2o]
            .iter()
            .map(|v| v + rng.gaussian(0.0, config.noise_level))
            .sum();
        if total_volume <= 0.0 {
            return Err(ValidationError::out_of_range(
                "volumes",
                "total volume after mixing must be positive",
            )
            .into());
        }

        let initial_cv = STOCK_CV * volumes.cv / total_volume;
        let hydroxide = STOCK_OH * volumes.oh / total_volume;
        let pseudo_rate = rate_constant(config.temperature) * hydroxide.powf(HYDROXIDE_ORDER);
        let initial_absorbance = initial_cv * ABSORPTIVITY;

        let spec = CurveSpec {
            nvalues: config.number_of_values,
            xrange: (0.0, config.expt_time),
            spacing: XSpacing::Linear,
            noise_level: config.noise_level,
            background: config.background,
            positive: true,
            precision: PRECISION,
        };
        let points = sample_curve(&mut rng, &spec, |t| {
            initial_absorbance * (-pseudo_rate * t).exp()
        })?;

        let mut metadata = base_metadata(self.kind(), student_id, points.len());
        metadata.insert(
            "Temperature (C)",
            format!("{:.2}", kelvin_to_celsius(config.temperature)),
        );
        metadata.insert("Volume of CV (mL)", volumes.cv);
        metadata.insert("Volume of OH (mL)", volumes.oh);
        metadata.insert("Volume of H2O (mL)", volumes.h2o);

        debug!(lab = %self.kind(), student_id, points = points.len(), "generated dataset");
        Ok(Dataset::new(COLUMNS, points, PRECISION, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rate_constant_increases_with_temperature() {
        assert!(rate_constant(310.0) > rate_constant(298.15));
    }

    #[test]
    fn test_missing_volume_component_is_named() {
        let params = json!({"volumes": {"cv": 10, "oh": 10}, "temperature": 298.15});
        let err = CrystalVioletConfig::from_parameters(params.as_object().unwrap()).unwrap_err();
        assert!(err.to_string().contains("volumes.h2o"), "{}", err);
    }

    #[test]
    fn test_all_zero_volumes_rejected() {
        let config = CrystalVioletConfig::new(Volumes::new(0.0, 0.0, 0.0), 298.15);
        assert!(config.validate().is_err());
    }
}
