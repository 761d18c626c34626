//! Bomb calorimetry lab
//!
//! A pressed tablet of a reference compound burns in oxygen inside a
//! constant-volume bomb. The water jacket's temperature drifts slowly, jumps
//! after ignition as the combustion heat spreads through the calorimeter,
//! and then drifts again at a higher level.
//!
//! The temperature rise follows from the internal energy of combustion:
//!
//! ```text
//! ΔcH = n_CO2·ΔfH(CO2) + n_H2O·ΔfH(H2O) − ΔfH(sample)
//! ΔU  = n·ΔcH − n·RT·Δn_gas
//! ΔT  = −ΔU / C_cal
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::params::{
    ensure_count, ensure_non_negative, ensure_positive, extract_required, extract_with_default,
    parse_sample, LabParameters,
};
use super::sampling::{noise, round_to};
use super::{base_metadata, seeded_rng, LabGenerator, LabKind, LabSession};
use crate::core::constants::{DEFAULT_TEMPERATURE, GAS_CONSTANT};
use crate::error::{LabError, ValidationError};
use crate::models::{DataPoint, Dataset, Precision};

/// Heat capacity of the calorimeter (J/K)
const CALORIMETER_CONSTANT: f64 = 10135.0;
/// Standard enthalpy of formation of CO2 (J/mol)
const CO2_FORMATION_ENTHALPY: f64 = -393.51e3;
/// Standard enthalpy of formation of liquid H2O (J/mol)
const H2O_FORMATION_ENTHALPY: f64 = -285.83e3;
/// Nominal tablet mass and its spread (mg)
const TABLET_MASS: (f64, f64) = (1000.0, 100.0);
/// Relaxation times between ignition and the end of the recording
const SETTLING_TIME_CONSTANTS: f64 = 5.0;

const PRECISION: Precision = Precision::new(1, 3);
const COLUMNS: [&str; 2] = ["Time (s)", "Temperature (K)"];

/// Reference compounds that can be burned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombustionSample {
    Benzoic,
    Sucrose,
    Naphthalene,
}

/// Thermochemical data of a compound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleProperties {
    /// Molar mass (g/mol)
    pub molar_mass: f64,
    /// CO2 molecules produced per molecule burned
    pub co2: f64,
    /// H2O molecules produced per molecule burned
    pub h2o: f64,
    /// Change in moles of gas per mole burned
    pub gas_change: f64,
    /// Standard enthalpy of formation (J/mol)
    pub formation_enthalpy: f64,
}

impl CombustionSample {
    pub const ALL: [CombustionSample; 3] = [
        CombustionSample::Benzoic,
        CombustionSample::Sucrose,
        CombustionSample::Naphthalene,
    ];

    pub const NAMES: [&'static str; 3] = ["benzoic", "sucrose", "naphthalene"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CombustionSample::Benzoic => "benzoic",
            CombustionSample::Sucrose => "sucrose",
            CombustionSample::Naphthalene => "naphthalene",
        }
    }

    pub fn properties(&self) -> SampleProperties {
        match self {
            // C7H6O2 + 15/2 O2 -> 7 CO2 + 3 H2O
            CombustionSample::Benzoic => SampleProperties {
                molar_mass: 122.123,
                co2: 7.0,
                h2o: 3.0,
                gas_change: 7.0 - 15.0 / 2.0,
                formation_enthalpy: -384.8e3,
            },
            // C12H22O11 + 12 O2 -> 12 CO2 + 11 H2O
            CombustionSample::Sucrose => SampleProperties {
                molar_mass: 342.3,
                co2: 12.0,
                h2o: 11.0,
                gas_change: 0.0,
                formation_enthalpy: -2221.2e3,
            },
            // C10H8 + 12 O2 -> 10 CO2 + 4 H2O
            CombustionSample::Naphthalene => SampleProperties {
                molar_mass: 128.17,
                co2: 10.0,
                h2o: 4.0,
                gas_change: 10.0 - 12.0,
                formation_enthalpy: 77e3,
            },
        }
    }

    /// Molar enthalpy of combustion (J/mol)
    pub fn combustion_enthalpy(&self) -> f64 {
        let p = self.properties();
        p.co2 * CO2_FORMATION_ENTHALPY + p.h2o * H2O_FORMATION_ENTHALPY - p.formation_enthalpy
    }
}

impl fmt::Display for CombustionSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombustionSample {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CombustionSample::ALL
            .into_iter()
            .find(|sample| sample.as_str() == s)
            .ok_or(())
    }
}

/// Configuration for [`BombCalorimetry`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BombCalorimetryConfig {
    pub sample: CombustionSample,
    /// Starting jacket temperature (K)
    pub temperature: f64,
    /// Second at which the tablet is ignited
    pub ignition_time: f64,
    /// Time constant of heat spreading through the calorimeter (s)
    pub relaxation_time: f64,
    pub number_of_values: usize,
    /// Thermometer noise (K)
    pub noise_level: f64,
}

impl BombCalorimetryConfig {
    pub fn new(sample: CombustionSample) -> Self {
        Self {
            sample,
            temperature: DEFAULT_TEMPERATURE,
            ignition_time: 20.0,
            relaxation_time: 3.0,
            number_of_values: 100,
            noise_level: 0.1,
        }
    }

    /// Build from loosely typed parameters; `sample` is required
    pub fn from_parameters(params: &LabParameters) -> Result<Self, LabError> {
        let name: String = extract_required(params, "sample")?;
        let sample = parse_sample(LabKind::BombCalorimetry.as_str(), &name)?;
        let defaults = Self::new(sample);
        Ok(Self {
            temperature: extract_with_default(params, "temperature", defaults.temperature)?,
            ignition_time: extract_with_default(params, "ignition_time", defaults.ignition_time)?,
            relaxation_time: extract_with_default(
                params,
                "relaxation_time",
                defaults.relaxation_time,
            )?,
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
        ensure_non_negative("ignition_time", self.ignition_time)?;
        ensure_positive("relaxation_time", self.relaxation_time)?;
        ensure_non_negative("noise_level", self.noise_level)?;
        ensure_count("number_of_values", self.number_of_values)?;
        // The rise must settle before the recording ends
        let last_reading = (self.number_of_values - 1) as f64;
        let settled = self.ignition_time + SETTLING_TIME_CONSTANTS * self.relaxation_time;
        if settled > last_reading {
            return Err(ValidationError::out_of_range(
                "ignition_time",
                format!(
                    "rise settles at {} s, after the last reading at {} s",
                    settled, last_reading
                ),
            ));
        }
        Ok(())
    }
}

/// Temperature rise (K) for burning `mass_mg` of `sample` at `temperature`
pub fn temperature_rise(sample: CombustionSample, mass_mg: f64, temperature: f64) -> f64 {
    let props = sample.properties();
    let moles = mass_mg / 1000.0 / props.molar_mass;
    let enthalpy = sample.combustion_enthalpy() * moles;
    let pv_work = moles * GAS_CONSTANT * temperature * props.gas_change;
    let internal_energy = enthalpy - pv_work;
    -internal_energy / CALORIMETER_CONSTANT
}

/// Bomb calorimetry lab generator
#[derive(Debug, Clone, Default)]
pub struct BombCalorimetry {
    session: LabSession<BombCalorimetryConfig>,
}

impl BombCalorimetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(&mut self, config: BombCalorimetryConfig) -> Result<(), LabError> {
        config.validate()?;
        self.session.set_config(config);
        Ok(())
    }

    pub fn config(&self) -> Option<&BombCalorimetryConfig> {
        self.session.config()
    }
}

impl LabGenerator for BombCalorimetry {
    fn kind(&self) -> LabKind {
        LabKind::BombCalorimetry
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
        let config = BombCalorimetryConfig::from_parameters(params)
            .inspect_err(|e| debug!(lab = %self.kind(), error = %e, "rejected parameters"))?;
        self.configure(config)
    }

    fn create_data_for_lab(&self) -> Result<Dataset, LabError> {
        let (student_id, config) = self.session.ready("sample")?;
        let mut rng = seeded_rng(self.kind(), student_id);

        let n = config.number_of_values;
        let slope_before = rng.uniform(0.0, config.noise_level) / 3.0;
        let slope_after = rng.uniform(0.0, config.noise_level) / 3.0;
        let mass = rng.gaussian(TABLET_MASS.0, TABLET_MASS.1);
        let delta_t = temperature_rise(config.sample, mass, config.temperature);
        let readings = noise(&mut rng, n, config.noise_level);

        let mut jacket = config.temperature;
        let points = readings
            .into_iter()
            .enumerate()
            .map(|(i, eps)| {
                let t = i as f64;
                let mut heat = 0.0;
                if t < config.ignition_time {
                    jacket += slope_before;
                } else {
                    jacket += slope_after;
                    heat = delta_t
                        * (1.0 - (-(t - config.ignition_time) / config.relaxation_time).exp());
                }
                DataPoint::new(t, round_to(jacket + heat + eps, PRECISION.y))
            })
            .collect();

        let mut metadata = base_metadata(self.kind(), student_id, n);
        metadata.insert("Tablet mass (mg)", format!("{:.1}", mass));
        metadata.insert("Ignition time (s)", config.ignition_time);
        metadata.insert("Sample", config.sample);

        debug!(lab = %self.kind(), student_id, points = n, delta_t, "generated dataset");
        Ok(Dataset::new(COLUMNS, points, PRECISION, metadata))
    }

    fn available_samples(&self) -> &'static [&'static str] {
        &CombustionSample::NAMES
    }
}
