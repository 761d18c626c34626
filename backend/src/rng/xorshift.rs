//! xorshift64* random number generator
//!
//! This is a fast, high-quality PRNG that is deterministic on every platform
//! and suitable for generating classroom datasets.
//!
//! # Algorithm
//!
//! The seed is scrambled once with SplitMix64 so that small or adjacent
//! student seeds start in unrelated parts of the sequence. Every draw then
//! advances xorshift64* (64-bit state, 64-bit output), which passes
//! TestU01's BigCrush.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. A student who regenerates
//! their dataset must get exactly the file they analyzed before.

use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Replaces a zero state, which xorshift can never leave.
const NONZERO_STATE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use cek_labs_core::SeededRandom;
///
/// let mut rng = SeededRandom::new(12345);
/// let u = rng.random();
/// assert!((0.0..1.0).contains(&u));
/// let noise = rng.normal(0.0, 0.5, 10);
/// assert_eq!(noise.len(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRandom {
    /// Internal state (64-bit, never zero)
    state: u64,
}

impl SeededRandom {
    /// Create a new generator from a seed
    ///
    /// Any value is accepted, including 0.
    pub fn new(seed: u64) -> Self {
        Self::from_state(splitmix64(seed))
    }

    /// Create a generator from a signed seed
    ///
    /// Negative seeds are reinterpreted as their two's complement bit pattern,
    /// so `from_signed(-1)` and `new(u64::MAX)` are the same generator.
    pub fn from_signed(seed: i64) -> Self {
        Self::new(seed as u64)
    }

    /// Resume a generator from a state previously returned by [`state`](Self::state)
    ///
    /// # Example
    /// ```
    /// use cek_labs_core::SeededRandom;
    ///
    /// let mut rng = SeededRandom::new(7);
    /// rng.random();
    /// let mut resumed = SeededRandom::from_state(rng.state());
    /// assert_eq!(rng.random(), resumed.random());
    /// ```
    pub fn from_state(state: u64) -> Self {
        let state = if state == 0 { NONZERO_STATE } else { state };
        Self { state }
    }

    /// Current internal state (for checkpointing/replay)
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Generate next random u64 value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn random(&mut self) -> f64 {
        // Top 53 bits fill the f64 mantissa exactly
        (self.next_u64() >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform f64 in range [low, high)
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.random()
    }

    /// Generate random integer in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let range_size = max.wrapping_sub(min) as u64;
        min.wrapping_add((self.next_u64() % range_size) as i64)
    }

    /// Single draw from Normal(mean, std_dev)
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let (z, _) = self.standard_normal_pair();
        mean + std_dev * z
    }

    /// `count` draws from Normal(mean, std_dev)
    ///
    /// Uses the Box-Muller transform; each pair of uniforms yields two
    /// samples (cosine and sine branch). With an odd count the final sine
    /// sample is discarded.
    pub fn normal(&mut self, mean: f64, std_dev: f64, count: usize) -> Vec<f64> {
        let mut samples = Vec::with_capacity(count);
        while samples.len() < count {
            let (z0, z1) = self.standard_normal_pair();
            samples.push(mean + std_dev * z0);
            if samples.len() < count {
                samples.push(mean + std_dev * z1);
            }
        }
        samples
    }

    fn standard_normal_pair(&mut self) -> (f64, f64) {
        // 1 - u keeps the logarithm argument in (0, 1]
        let u1 = 1.0 - self.random();
        let u2 = self.random();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = 2.0 * PI * u2;
        (radius * angle.cos(), radius * angle.sin())
    }
}

impl FromStr for SeededRandom {
    type Err = ValidationError;

    /// Parse a decimal seed; a leading `-` selects [`SeededRandom::from_signed`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(seed) = trimmed.parse::<u64>() {
            return Ok(Self::new(seed));
        }
        trimmed
            .parse::<i64>()
            .map(Self::from_signed)
            .map_err(|_| ValidationError::InvalidSeed(s.to_string()))
    }
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_produces_nonzero_state() {
        let rng = SeededRandom::new(0);
        assert_ne!(rng.state(), 0);
        assert_ne!(SeededRandom::from_state(0).state(), 0);
    }

    #[test]
    #[should_panic(expected = "min must be less than max")]
    fn test_range_invalid_bounds() {
        let mut rng = SeededRandom::new(12345);
        rng.range(100, 50);
    }

    #[test]
    fn test_random_in_unit_interval() {
        let mut rng = SeededRandom::new(12345);

        for _ in 0..1000 {
            let val = rng.random();
            assert!(
                (0.0..1.0).contains(&val),
                "random() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    fn test_negative_seed_matches_bit_pattern() {
        let mut a = SeededRandom::from_signed(-1);
        let mut b = SeededRandom::new(u64::MAX);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!("12345".parse::<SeededRandom>(), Ok(SeededRandom::new(12345)));
        assert_eq!(" -3 ".parse::<SeededRandom>(), Ok(SeededRandom::from_signed(-3)));
        assert_eq!(
            "abc".parse::<SeededRandom>(),
            Err(ValidationError::InvalidSeed("abc".to_string()))
        );
    }

    #[test]
    fn test_normal_odd_count() {
        let mut rng = SeededRandom::new(1);
        assert_eq!(rng.normal(0.0, 1.0, 7).len(), 7);
        assert!(rng.normal(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_uniform_bounds() {
        let mut rng = SeededRandom::new(99);
        for _ in 0..500 {
            let v = rng.uniform(-2.0, 3.0);
            assert!((-2.0..3.0).contains(&v));
        }
    }
}
