//! Input validation for IPO scoring.
//!
//! This module is the sole guard between raw caller input and the numeric
//! feature code, so it is intentionally strict:
//!
//! - **String hygiene**: length ceilings, ticker character whitelist, and
//!   control-character rejection on every identity field.
//! - **Numeric sanity**: finiteness everywhere, plus domain-informed ceilings
//!   that reject absurd deals (a $50,000 offer price, a $2T revenue line).
//! - **Categorical codes**: tier/cyclicality/region values must be in range.
//!
//! Every violation is a distinct `AppError` with exit code 2 naming the
//! offending field and constraint. Success returns `()`: the input may
//! proceed to feature extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{DealTerms, FinancialSnapshot, IpoInput};
use crate::error::AppError;

// String length ceilings.
pub const MAX_TICKER_LENGTH: usize = 16;
pub const MAX_COMPANY_NAME_LENGTH: usize = 256;
pub const MAX_COUNTRY_LENGTH: usize = 64;
pub const MAX_SECTOR_LENGTH: usize = 128;

// Numeric soft bounds (domain-informed, not hard financial rules).
pub const MAX_PRICE: f64 = 10_000.0;
pub const MAX_OFFER_SHARES: i64 = 10_000_000_000; // 10 billion
pub const MAX_REVENUE: f64 = 1_000_000_000_000.0; // 1 trillion

/// Allowed ticker pattern: uppercase letters, digits, dot, dash.
static TICKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9.\-]+$").expect("ticker pattern is valid"));

fn ensure_finite(name: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Reject strings containing control characters (line breaks, tabs, etc.).
fn reject_control_chars(label: &str, value: &str) -> Result<(), AppError> {
    if value.chars().any(|ch| (ch as u32) < 32) {
        return Err(AppError::validation(format!(
            "{label} contains control characters, which are not allowed"
        )));
    }
    Ok(())
}

fn validate_identity_strings(ipo: &IpoInput) -> Result<(), AppError> {
    if let Some(ticker) = ipo.ticker.as_deref().filter(|s| !s.is_empty()) {
        if ticker.chars().count() > MAX_TICKER_LENGTH {
            return Err(AppError::validation(format!(
                "ticker is too long (>{MAX_TICKER_LENGTH} characters)"
            )));
        }
        reject_control_chars("ticker", ticker)?;
        if !TICKER_PATTERN.is_match(ticker) {
            return Err(AppError::validation(
                "ticker contains invalid characters; only [A-Z0-9.-] are allowed",
            ));
        }
    }

    if let Some(name) = ipo.company_name.as_deref().filter(|s| !s.is_empty()) {
        if name.chars().count() > MAX_COMPANY_NAME_LENGTH {
            return Err(AppError::validation(format!(
                "company_name is too long (>{MAX_COMPANY_NAME_LENGTH} characters)"
            )));
        }
        reject_control_chars("company_name", name)?;
    }

    if let Some(country) = ipo.country.as_deref().filter(|s| !s.is_empty()) {
        if country.chars().count() > MAX_COUNTRY_LENGTH {
            return Err(AppError::validation(format!(
                "country is too long (>{MAX_COUNTRY_LENGTH} characters)"
            )));
        }
        reject_control_chars("country", country)?;
    }

    if let Some(sector) = ipo.sector.as_deref().filter(|s| !s.is_empty()) {
        if sector.chars().count() > MAX_SECTOR_LENGTH {
            return Err(AppError::validation(format!(
                "sector is too long (>{MAX_SECTOR_LENGTH} characters)"
            )));
        }
        reject_control_chars("sector", sector)?;
    }

    Ok(())
}

fn validate_deal_terms(deal: &DealTerms) -> Result<(), AppError> {
    ensure_finite("price_low", deal.price_low)?;
    ensure_finite("price_high", deal.price_high)?;
    ensure_finite("free_float_pct", deal.free_float_pct)?;

    if deal.price_low <= 0.0 || deal.price_high <= 0.0 {
        return Err(AppError::validation("price_low and price_high must be > 0"));
    }

    if deal.price_high < deal.price_low {
        return Err(AppError::validation("price_high must be >= price_low"));
    }

    if deal.price_low > MAX_PRICE || deal.price_high > MAX_PRICE {
        return Err(AppError::validation(format!(
            "price_low/price_high look unrealistic (> {MAX_PRICE})"
        )));
    }

    if deal.offer_shares <= 0 {
        return Err(AppError::validation("offer_shares must be > 0"));
    }

    if deal.offer_shares > MAX_OFFER_SHARES {
        return Err(AppError::validation(format!(
            "offer_shares looks unrealistic (> {MAX_OFFER_SHARES})"
        )));
    }

    if !(0.0..=100.0).contains(&deal.free_float_pct) {
        return Err(AppError::validation("free_float_pct must be in [0, 100]"));
    }

    if deal.lockup_days < 0 {
        return Err(AppError::validation("lockup_days must be >= 0"));
    }

    Ok(())
}

fn validate_financials(fin: &FinancialSnapshot) -> Result<(), AppError> {
    ensure_finite("revenue_ttm", fin.revenue_ttm)?;
    ensure_finite("gross_margin", fin.gross_margin)?;
    ensure_finite("net_margin", fin.net_margin)?;
    ensure_finite("growth_yoy", fin.growth_yoy)?;

    if fin.revenue_ttm < 0.0 {
        return Err(AppError::validation("revenue_ttm must be >= 0"));
    }

    if fin.revenue_ttm > MAX_REVENUE {
        return Err(AppError::validation(format!(
            "revenue_ttm looks unrealistic (> {MAX_REVENUE})"
        )));
    }

    if !(-100.0..=100.0).contains(&fin.gross_margin) {
        return Err(AppError::validation(
            "gross_margin looks out of bounds (-100, 100)",
        ));
    }

    if !(-100.0..=100.0).contains(&fin.net_margin) {
        return Err(AppError::validation(
            "net_margin looks out of bounds (-100, 100)",
        ));
    }

    if !(-100.0..=300.0).contains(&fin.growth_yoy) {
        return Err(AppError::validation(
            "growth_yoy looks out of bounds (-100, 300)",
        ));
    }

    Ok(())
}

fn validate_categorical(ipo: &IpoInput) -> Result<(), AppError> {
    if !(1..=5).contains(&ipo.underwriter_tier) {
        return Err(AppError::validation("underwriter_tier must be in [1, 5]"));
    }

    if !(0..=2).contains(&ipo.sector_cyclicality) {
        return Err(AppError::validation(
            "sector_cyclicality must be in {0, 1, 2}",
        ));
    }

    if !(0..=2).contains(&ipo.region_risk_tier) {
        return Err(AppError::validation("region_risk_tier must be in {0, 1, 2}"));
    }

    Ok(())
}

/// Validate that an `IpoInput` satisfies basic domain and security constraints.
///
/// This protects the model from obviously-invalid, malicious, or absurd
/// inputs (NaNs, infinities, huge values, suspicious strings).
/// If a `sector_ps_multiple` is present it must be finite; the
/// valuation extractor itself decides whether a non-positive multiple is
/// usable.
pub fn validate_ipo_input(ipo: &IpoInput) -> Result<(), AppError> {
    validate_identity_strings(ipo)?;
    validate_deal_terms(&ipo.deal_terms)?;
    validate_financials(&ipo.financials)?;
    validate_categorical(ipo)?;

    if let Some(ps) = ipo.sector_ps_multiple {
        ensure_finite("sector_ps_multiple", ps)?;
    }

    Ok(())
}
