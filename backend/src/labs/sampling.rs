//! Curve sampling shared by the labs
//!
//! Every curve lab follows the same recipe: choose x values over a range,
//! evaluate the model, add a constant background and Gaussian measurement
//! noise, optionally clamp to positive values (absorbances and
//! concentrations cannot be negative), and round to the precision a real
//! instrument would report.

use crate::error::ValidationError;
use crate::models::{DataPoint, Precision};
use crate::rng::SeededRandom;

/// How x values are placed over the range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XSpacing {
    /// Evenly spaced, both ends included
    Linear,
    /// Uniform random, rounded to the x precision and sorted
    Random,
}

/// Everything needed to sample one curve
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSpec {
    pub nvalues: usize,
    pub xrange: (f64, f64),
    pub spacing: XSpacing,
    /// Standard deviation of the added noise; `<= 0` disables noise
    pub noise_level: f64,
    pub background: f64,
    pub positive: bool,
    pub precision: Precision,
}

/// Sample `model` according to `spec`
///
/// Draw order from `rng`: x values (random spacing only), then noise.
pub fn sample_curve<F>(
    rng: &mut SeededRandom,
    spec: &CurveSpec,
    model: F,
) -> Result<Vec<DataPoint>, ValidationError>
where
    F: Fn(f64) -> f64,
{
    let (lo, hi) = spec.xrange;
    if spec.nvalues == 0 {
        return Err(ValidationError::InvalidSampling(
            "number of values must be positive".to_string(),
        ));
    }
    if !(lo.is_finite() && hi.is_finite()) || lo > hi {
        return Err(ValidationError::InvalidSampling(format!(
            "x range [{}, {}] is not a valid interval",
            lo, hi
        )));
    }

    let xs = match spec.spacing {
        XSpacing::Linear => linspace(lo, hi, spec.nvalues),
        XSpacing::Random => {
            let mut xs: Vec<f64> = (0..spec.nvalues)
                .map(|_| round_to(rng.uniform(lo, hi), spec.precision.x))
                .collect();
            xs.sort_by(f64::total_cmp);
            xs
        }
    };

    let noise_samples = noise(rng, spec.nvalues, spec.noise_level);
    let floor = 10f64.powi(-(spec.precision.y as i32));

    let points = xs
        .into_iter()
        .zip(noise_samples)
        .map(|(x, eps)| {
            let mut y = model(x) + spec.background + eps;
            if spec.positive {
                y = y.abs().max(floor);
            }
            DataPoint::new(x, round_to(y, spec.precision.y))
        })
        .collect();

    Ok(points)
}

/// `n` Gaussian noise samples with standard deviation `level`
pub fn noise(rng: &mut SeededRandom, n: usize, level: f64) -> Vec<f64> {
    if level <= 0.0 {
        return vec![0.0; n];
    }
    rng.normal(0.0, level, n)
}

/// `n` evenly spaced values over `[lo, hi]`
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n).map(|i| lo + step * i as f64).collect()
        }
    }
}

/// Round half away from zero to `decimals` places
///
/// Values that round to zero come back as `+0.0`, never `-0.0`.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale + 0.0
}
