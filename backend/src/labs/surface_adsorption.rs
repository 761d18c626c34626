//! Surface adsorption lab
//!
//! Students add increasing amounts of dye to a fixed volume containing an
//! adsorbent and measure how much dye stays in solution. At equilibrium the
//! surface follows a Langmuir isotherm, so the dissolved concentration rises
//! slowly while the surface fills and then tracks the added dye once the
//! monolayer saturates.
//!
//! With `K` the Langmuir constant, `Q` the monolayer capacity and `x` the
//! total dye concentration, the dissolved concentration `c` solves
//! `K c² − (xK − KQ − 1) c − x = 0`:
//!
//! ```text
//! c = ((xK − KQ − 1) + sqrt((xK − KQ − 1)² + 4xK)) / (2K)
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::params::{
    ensure_count, ensure_non_negative, ensure_positive, extract_required, extract_with_default,
    LabParameters,
};
use super::sampling::{sample_curve, CurveSpec, XSpacing};
use super::{base_metadata, seeded_rng, LabGenerator, LabKind, LabSession};
use crate::core::constants::{kelvin_to_celsius, GAS_CONSTANT};
use crate::error::{LabError, ValidationError};
use crate::models::{DataPoint, Dataset, Precision};

/// Adsorption enthalpy (J/mol)
const ADSORPTION_ENTHALPY: f64 = -19.51e3;
/// Adsorption entropy (J/mol/K)
const ADSORPTION_ENTROPY: f64 = -10.0;
/// Monolayer coverage (mol/L of adsorbent suspension)
const MONOLAYER_CAPACITY: f64 = 1e-4;
/// Molar mass of the dye (g/mol)
const DYE_MOLAR_MASS: f64 = 584.910641;

const PRECISION: Precision = Precision::new(4, 10);
const COLUMNS: [&str; 2] = ["Dye added (mg)", "Dye in solution (mol/L)"];

/// Configuration for [`SurfaceAdsorption`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceAdsorptionConfig {
    /// Temperature (K)
    pub temperature: f64,
    /// Solution volume (L)
    pub volume: f64,
    /// Smallest amount of dye added (mg)
    pub min_dye: f64,
    /// Largest amount of dye added (mg)
    pub max_dye: f64,
    pub number_of_values: usize,
    /// Standard deviation of the concentration noise (mol/L)
    pub noise_level: f64,
}

impl SurfaceAdsorptionConfig {
    /// Default experiment at the given temperature
    pub fn new(temperature: f64) -> Self {
        Self {
            temperature,
            volume: 1.0,
            min_dye: 500.0,
            max_dye: 10_000.0,
            number_of_values: 100,
            noise_level: 0.5e-5,
        }
    }

    /// Build from loosely typed parameters; `temperature` is required
    pub fn from_parameters(params: &LabParameters) -> Result<Self, LabError> {
        let defaults = Self::new(extract_required(params, "temperature")?);
        Ok(Self {
            volume: extract_with_default(params, "volume", defaults.volume)?,
            min_dye: extract_with_default(params, "min_dye", defaults.min_dye)?,
            max_dye: extract_with_default(params, "max_dye", defaults.max_dye)?,
            number_of_values: extract_with_default(
                params,
                "number_of_values",
                defaults.number_of_values,
            )?,
            noise_level: extract_with_default(params, "noise_level", defaults.noise_level)?,
            ..defaults
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_positive("temperature", self.temperature)?;
        ensure_positive("volume", self.volume)?;
        ensure_non_negative("min_dye", self.min_dye)?;
        ensure_non_negative("noise_level", self.noise_level)?;
        ensure_count("number_of_values", self.number_of_values)?;
        if self.max_dye <= self.min_dye {
            return Err(ValidationError::out_of_range(
                "max_dye",
                format!("must exceed min_dye ({})", self.min_dye),
            ));
        }
        Ok(())
    }

    /// Factor converting concentration (mol/L) into added dye (mg)
    fn mg_per_molar(&self) -> f64 {
        1000.0 * DYE_MOLAR_MASS * self.volume
    }
}

/// Langmuir equilibrium constant (L/mol) at `temperature` (K)
///
/// `ln K = (−ΔH/T + ΔS) / R`
pub fn equilibrium_constant(temperature: f64) -> f64 {
    ((-ADSORPTION_ENTHALPY / temperature + ADSORPTION_ENTROPY) / GAS_CONSTANT).exp()
}

/// Dissolved dye concentration for total concentration `x`
fn dissolved_concentration(x: f64, k: f64, q: f64) -> f64 {
    let b = x * k - k * q - 1.0;
    (b + (b * b + 4.0 * x * k).sqrt()) / (2.0 * k)
}

/// Surface adsorption lab generator
#[derive(Debug, Clone, Default)]
pub struct SurfaceAdsorption {
    session: LabSession<SurfaceAdsorptionConfig>,
}

impl SurfaceAdsorption {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a typed configuration after validating it
    pub fn configure(&mut self, config: SurfaceAdsorptionConfig) -> Result<(), LabError> {
        config.validate()?;
        self.session.set_config(config);
        Ok(())
    }

    pub fn config(&self) -> Option<&SurfaceAdsorptionConfig> {
        self.session.config()
    }
}

impl LabGenerator for SurfaceAdsorption {
    fn kind(&self) -> LabKind {
        LabKind::SurfaceAdsorption
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
        let config = SurfaceAdsorptionConfig::from_parameters(params)
            .inspect_err(|e| debug!(lab = %self.kind(), error = %e, "rejected parameters"))?;
        self.configure(config)
    }

    fn create_data_for_lab(&self) -> Result<Dataset, LabError> {
        let (student_id, config) = self.session.ready("temperature")?;
        let mut rng = seeded_rng(self.kind(), student_id);

        let k = equilibrium_constant(config.temperature);
        let mg_per_molar = config.mg_per_molar();
        let spec = CurveSpec {
            nvalues: config.number_of_values,
            xrange: (config.min_dye / mg_per_molar, config.max_dye / mg_per_molar),
            spacing: XSpacing::Linear,
            noise_level: config.noise_level,
            background: 0.0,
            positive: true,
            precision: PRECISION,
        };
        let points: Vec<DataPoint> = sample_curve(&mut rng, &spec, |x| {
            dissolved_concentration(x, k, MONOLAYER_CAPACITY)
        })?
        .into_iter()
        .map(|p| DataPoint::new(p.x * mg_per_molar, p.y))
        .collect();

        let mut metadata = base_metadata(self.kind(), student_id, points.len());
        metadata.insert(
            "Temperature (C)",
            format!("{:.2}", kelvin_to_celsius(config.temperature)),
        );
        metadata.insert("Volume (L)", config.volume);
        metadata.insert("Molar mass (g/mol)", DYE_MOLAR_MASS);
        metadata.insert("MinDye (mg)", config.min_dye);
        metadata.insert("MaxDye (mg)", config.max_dye);

        debug!(lab = %self.kind(), student_id, points = points.len(), "generated dataset");
        Ok(Dataset::new(COLUMNS, points, PRECISION, metadata))
    }
}
