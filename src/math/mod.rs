//! Small linear-algebra helpers backing calibration.

pub mod ols;

pub use ols::*;
