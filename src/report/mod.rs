//! Reporting utilities: formatted terminal output.
//!
//! Formatting lives in one place so the scoring/calibration code stays clean
//! and testable, and output changes are localized.

pub mod format;

pub use format::*;
