//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the labs MUST go through this module.

mod seed;
mod xorshift;

pub use seed::derive_seed;
pub use xorshift::SeededRandom;
