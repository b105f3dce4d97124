//! Synthetic data generation for calibration demos and tests.

pub mod sample;

pub use sample::*;
