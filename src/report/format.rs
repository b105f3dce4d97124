//! Terminal report formatting.
//!
//! The printed report is illustrative output for analysts, not a machine
//! contract; downstream tools should consume the JSON exports instead.

use crate::domain::{Coefficients, FeatureVector, IpoInput, RiskResult};
use crate::io::dataset::LabeledDataset;

/// Format the full scoring report: identity, score, attractiveness, drivers,
/// and the raw feature dump.
pub fn format_risk_report(ipo: &IpoInput, result: &RiskResult) -> String {
    let mut out = String::new();

    out.push_str("=== ipo - IPO Risk Score ===\n");
    if let Some(ticker) = ipo.ticker.as_deref() {
        out.push_str(&format!("Ticker:            {ticker}\n"));
    }
    if let Some(name) = ipo.company_name.as_deref() {
        out.push_str(&format!("Company:           {name}\n"));
    }
    if let Some(country) = ipo.country.as_deref() {
        out.push_str(&format!("Country:           {country}\n"));
    }
    if let Some(sector) = ipo.sector.as_deref() {
        out.push_str(&format!("Sector:            {sector}\n"));
    }

    out.push_str(&format!("\nRisk score:        {:.2} / 100\n", result.risk_score));
    if let Some(attractiveness) = result.attractiveness_percent {
        out.push_str(&format!("Attractiveness:    {attractiveness:.2} / 100\n"));
    }
    out.push_str(&format!("Model version:     {}\n", result.model_version));

    out.push_str("\nDrivers (coefficient x feature value, logit points):\n");
    if result.drivers.is_empty() {
        out.push_str("  (none: the active coefficient set weights no computed feature)\n");
    }
    for driver in &result.drivers {
        out.push_str(&format!(
            "  - {:<12} {:>8.4}  ({})\n",
            driver.name, driver.contribution_points, driver.description
        ));
    }

    out.push_str("\nRaw features:\n");
    out.push_str(&format_feature_lines(&result.raw_features));

    out
}

/// Format a bare feature vector (the `ipo features` command).
pub fn format_feature_vector(ipo: &IpoInput, features: &FeatureVector) -> String {
    let mut out = String::new();
    out.push_str("=== ipo - Feature Vector ===\n");
    if let Some(ticker) = ipo.ticker.as_deref() {
        out.push_str(&format!("Ticker: {ticker}\n"));
    }
    out.push_str(&format_feature_lines(features));
    out
}

/// Format a calibration run summary: dataset shape, skipped rows, and the
/// fitted weights.
pub fn format_calibration_report(dataset: &LabeledDataset, coeffs: &Coefficients) -> String {
    let mut out = String::new();

    out.push_str("=== ipo - Coefficient Calibration ===\n");
    out.push_str(&format!(
        "Rows: read={} used={} (labels: {} high-risk / {} benign)\n",
        dataset.stats.rows_read,
        dataset.stats.rows_used,
        dataset.stats.label_positive,
        dataset.stats.label_negative,
    ));

    if !dataset.row_errors.is_empty() {
        out.push_str(&format!("Skipped rows ({}):\n", dataset.row_errors.len()));
        for err in &dataset.row_errors {
            let ticker = err.ticker.as_deref().unwrap_or("?");
            out.push_str(&format!("  line {:>4} [{ticker}]: {}\n", err.line, err.message));
        }
    }

    out.push_str("\nFitted coefficients:\n");
    for (name, value) in coeffs.iter() {
        out.push_str(&format!("  {name:<12} = {value:+.4}\n"));
    }

    out
}

fn format_feature_lines(features: &FeatureVector) -> String {
    let mut out = String::new();
    for (name, value) in features.iter() {
        out.push_str(&format!("  {name:<12} = {value:.4}\n"));
    }
    out
}
