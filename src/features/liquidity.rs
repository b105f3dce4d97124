//! Liquidity and lock-up risk features.
//!
//! Three values are emitted:
//!
//! - `f_liq`: core float liquidity risk,
//!   `α1 · (1 - FF/100) + α2 · 1/(1 + ln(1 + DV))`
//!   where `FF` is the free-float percentage and `DV` the dollar value of the
//!   tradable float (mid price × offer shares × FF/100).
//! - `f_lock`: lock-up risk: `1 - min(L, L_max)/L_max`; shorter lock-ups
//!   mean higher risk.
//! - `f_liq_total`: the blend used by the default coefficient sets;
//!   `f_liq` and `f_lock` stay exposed individually for transparency.
//!
//! All outputs are clamped into [0, 1] before emission.

use crate::domain::{FeatureVector, IpoInput};

/// Tunable constants for the liquidity features.
///
/// The defaults are the model's canonical values; callers override fields
/// only for sensitivity analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityParams {
    /// Weight of the free-float component inside `f_liq`.
    pub alpha_free_float: f64,
    /// Weight of the dollar-float component inside `f_liq`.
    pub alpha_dollar_float: f64,
    /// Lock-up ceiling in days; lock-ups at or above this read as zero risk.
    pub lockup_max_days: i32,
    /// Weight of `f_liq` inside `f_liq_total`.
    pub weight_liquidity: f64,
    /// Weight of `f_lock` inside `f_liq_total`.
    pub weight_lockup: f64,
}

impl Default for LiquidityParams {
    fn default() -> Self {
        Self {
            alpha_free_float: 0.7,
            alpha_dollar_float: 0.3,
            lockup_max_days: 180,
            weight_liquidity: 0.7,
            weight_lockup: 0.3,
        }
    }
}

/// Core liquidity risk in [0, 1]; higher means a thinner, harder-to-trade float.
fn liquidity_core(free_float_pct: f64, dollar_float: f64, params: &LiquidityParams) -> f64 {
    let ff_clamped = free_float_pct.clamp(0.0, 100.0);
    let ff_component = 1.0 - ff_clamped / 100.0;

    let safe_dollar_float = dollar_float.max(0.0);
    let dv_component = 1.0 / (1.0 + safe_dollar_float.ln_1p());

    let f_liq =
        params.alpha_free_float * ff_component + params.alpha_dollar_float * dv_component;
    f_liq.clamp(0.0, 1.0)
}

/// Lock-up risk in [0, 1]: `1 - min(L, L_max)/L_max`.
fn lockup_feature(lockup_days: i32, params: &LiquidityParams) -> f64 {
    if params.lockup_max_days <= 0 {
        return 0.0;
    }

    let capped_days = lockup_days.clamp(0, params.lockup_max_days);
    let f_lock = 1.0 - capped_days as f64 / params.lockup_max_days as f64;
    f_lock.clamp(0.0, 1.0)
}

/// Compute all liquidity-related features for a given IPO.
pub fn compute_liquidity_features(ipo: &IpoInput, params: &LiquidityParams) -> FeatureVector {
    let free_float_fraction = (ipo.deal_terms.free_float_pct.max(0.0) / 100.0).min(1.0);
    let dollar_float = ipo.deal_terms.offer_value() * free_float_fraction;

    let f_liq = liquidity_core(ipo.deal_terms.free_float_pct, dollar_float, params);
    let f_lock = lockup_feature(ipo.deal_terms.lockup_days, params);

    let f_liq_total =
        (params.weight_liquidity * f_liq + params.weight_lockup * f_lock).clamp(0.0, 1.0);

    let mut out = FeatureVector::new();
    out.insert("f_liq", f_liq);
    out.insert("f_lock", f_lock);
    out.insert("f_liq_total", f_liq_total);
    out
}
