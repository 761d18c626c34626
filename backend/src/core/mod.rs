//! Physical constants and lab-wide defaults

pub mod constants;
