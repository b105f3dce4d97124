//! JSON exports for scoring results and calibrated coefficients.
//!
//! Both exports carry a small envelope (tool name + generation timestamp) so
//! downstream consumers can tell files apart and audit when they were made.
//! The coefficient export is directly reloadable via
//! `input::read_coefficients_json` and feeds straight back into the scorer.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Coefficients, RiskResult};
use crate::error::AppError;

/// Envelope for an exported scoring result.
#[derive(Debug, Clone, Serialize)]
pub struct ResultFile<'a> {
    pub tool: &'static str,
    pub generated: DateTime<Utc>,
    pub result: &'a RiskResult,
}

/// Fitting metadata carried alongside exported coefficients.
#[derive(Debug, Clone, Serialize)]
pub struct CalibrationMeta {
    pub observations: usize,
    pub positives: usize,
    pub ridge: f64,
}

/// Envelope for an exported coefficient set.
#[derive(Debug, Clone, Serialize)]
pub struct CoefficientsFile<'a> {
    pub tool: &'static str,
    pub generated: DateTime<Utc>,
    pub meta: &'a CalibrationMeta,
    pub coefficients: &'a Coefficients,
}

const TOOL: &str = "ipo";

/// Write a scoring result JSON file.
pub fn write_result_json(path: &Path, result: &RiskResult) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(5, format!("Failed to create result JSON '{}': {e}", path.display()))
    })?;

    let envelope = ResultFile {
        tool: TOOL,
        generated: Utc::now(),
        result,
    };

    serde_json::to_writer_pretty(file, &envelope)
        .map_err(|e| AppError::new(5, format!("Failed to write result JSON: {e}")))?;

    Ok(())
}

/// Write a calibrated coefficient set as JSON.
pub fn write_coefficients_json(
    path: &Path,
    coefficients: &Coefficients,
    meta: &CalibrationMeta,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            5,
            format!("Failed to create coefficients JSON '{}': {e}", path.display()),
        )
    })?;

    let envelope = CoefficientsFile {
        tool: TOOL,
        generated: Utc::now(),
        meta,
        coefficients,
    };

    serde_json::to_writer_pretty(file, &envelope)
        .map_err(|e| AppError::new(5, format!("Failed to write coefficients JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::input::read_coefficients_json;

    #[test]
    fn exported_coefficients_reload_into_the_same_map() {
        let mut coeffs = Coefficients::new();
        coeffs.insert("intercept", -0.75);
        coeffs.insert("f_liq_total", 1.9);
        coeffs.insert("f_fin", 1.1);

        let meta = CalibrationMeta {
            observations: 100,
            positives: 40,
            ridge: 1.0,
        };

        let path = std::env::temp_dir().join("ipo-risk-export-coeffs.json");
        write_coefficients_json(&path, &coeffs, &meta).unwrap();

        let reloaded = read_coefficients_json(&path).unwrap();
        assert_eq!(reloaded, coeffs);

        std::fs::remove_file(path).ok();
    }
}
