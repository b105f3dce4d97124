//! Load caller-supplied JSON files.
//!
//! Deal files are plain `IpoInput` JSON; coefficient files accept either the
//! bare name→weight map or the enveloped form `ipo calibrate --export`
//! produces (the map under a `"coefficients"` key).

use std::fs::File;
use std::path::Path;

use crate::domain::{Coefficients, IpoInput};
use crate::error::AppError;

/// Read an `IpoInput` from a JSON deal file.
///
/// Deserialization only checks shape; the caller still runs the validator
/// before any scoring.
pub fn read_ipo_json(path: &Path) -> Result<IpoInput, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(5, format!("Failed to open deal JSON '{}': {e}", path.display()))
    })?;
    let ipo: IpoInput = serde_json::from_reader(file)
        .map_err(|e| AppError::new(5, format!("Invalid deal JSON '{}': {e}", path.display())))?;
    Ok(ipo)
}

/// Read a coefficient map from a JSON file.
pub fn read_coefficients_json(path: &Path) -> Result<Coefficients, AppError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AppError::new(
            5,
            format!("Failed to open coefficients JSON '{}': {e}", path.display()),
        )
    })?;

    // Accept both the exported envelope and the bare map. Parsing straight
    // from the text (rather than through a Value) keeps weight order as
    // written in the file.
    #[derive(serde::Deserialize)]
    struct Envelope {
        coefficients: Coefficients,
    }

    let coeffs = if let Ok(envelope) = serde_json::from_str::<Envelope>(&text) {
        envelope.coefficients
    } else {
        serde_json::from_str::<Coefficients>(&text).map_err(|e| {
            AppError::new(
                5,
                format!(
                    "Coefficients JSON '{}' is not a name->weight map: {e}",
                    path.display()
                ),
            )
        })?
    };

    if coeffs.is_empty() {
        return Err(AppError::new(
            5,
            format!("Coefficients JSON '{}' contains no weights", path.display()),
        ));
    }

    Ok(coeffs)
}

/// Read a prospectus text file as UTF-8.
pub fn read_text_file(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|e| {
        AppError::new(5, format!("Failed to read text file '{}': {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("ipo-risk-test-{name}"));
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_a_minimal_deal_file() {
        let path = temp_file(
            "deal.json",
            r#"{
                "ticker": "UPX",
                "deal_terms": {
                    "price_low": 4.0, "price_high": 5.0,
                    "offer_shares": 1500000,
                    "free_float_pct": 10.0, "lockup_days": 180
                },
                "financials": {
                    "revenue_ttm": 8290827.0, "gross_margin": 30.5,
                    "net_margin": 12.6, "growth_yoy": 43.9
                },
                "underwriter_tier": 4,
                "auditor_is_big4": false,
                "sector_cyclicality": 2,
                "region_risk_tier": 2
            }"#,
        );
        let ipo = read_ipo_json(&path).unwrap();
        assert_eq!(ipo.ticker.as_deref(), Some("UPX"));
        assert_eq!(ipo.deal_terms.offer_shares, 1_500_000);
        assert!(ipo.sector_ps_multiple.is_none());
        assert!(ipo.prospectus_text.is_none());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn reads_bare_and_enveloped_coefficients() {
        let bare = temp_file("coeffs-bare.json", r#"{"intercept": -0.5, "f_uw": 1.5}"#);
        let coeffs = read_coefficients_json(&bare).unwrap();
        assert_eq!(coeffs.intercept(), -0.5);

        let enveloped = temp_file(
            "coeffs-env.json",
            r#"{"tool": "ipo", "coefficients": {"intercept": 0.25, "f_val": 1.0}}"#,
        );
        let coeffs = read_coefficients_json(&enveloped).unwrap();
        assert_eq!(coeffs.intercept(), 0.25);
        assert_eq!(coeffs.get("f_val"), Some(1.0));

        std::fs::remove_file(bare).ok();
        std::fs::remove_file(enveloped).ok();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_ipo_json(Path::new("/nonexistent/deal.json")).unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }
}
