//! Physical constants shared by the lab models
//!
//! All values are SI unless the name says otherwise.

/// Gas constant (J/mol/K)
pub const GAS_CONSTANT: f64 = 8.314;

/// Offset between Kelvin and Celsius
pub const ZERO_CELSIUS: f64 = 273.15;

/// Room temperature used when a lab does not ask for one (K)
pub const DEFAULT_TEMPERATURE: f64 = 298.0;

/// Convert a temperature in Kelvin to Celsius
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - ZERO_CELSIUS
}
