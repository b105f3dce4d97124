//! Valuation risk feature `f_val`.
//!
//! Two paths, in priority order:
//!
//! 1. **Sector premium**: when a positive peer-group price-to-sales multiple
//!    is available and the IPO has positive revenue:
//!    `premium = (PS_ipo - PS_sector) / PS_sector`, clamped into [0, 1].
//!    A negative premium clamps to 0: being cheaper than peers adds no risk.
//! 2. **Standalone heuristic**: otherwise, a piecewise-linear mapping of the
//!    IPO's own price-to-sales ratio. The breakpoints (PS 1 / 2 / 4 mapping to
//!    0.1 / 0.5 / 1.0) are acknowledged placeholders pending calibration.
//!
//! Non-positive revenue with no premium path reads as maximum risk.

use crate::domain::IpoInput;

/// Heuristic standalone mapping of the IPO's own PS multiple to [0, 1].
fn valuation_from_ps_multiple(offer_value: f64, revenue_ttm: f64) -> f64 {
    if revenue_ttm <= 0.0 {
        // No or negative revenue: treat as maximum valuation risk.
        return 1.0;
    }

    let ps_ipo = offer_value / revenue_ttm;

    if ps_ipo <= 1.0 {
        0.1
    } else if ps_ipo <= 2.0 {
        // Interpolate between 0.1 and 0.5.
        0.1 + 0.4 * (ps_ipo - 1.0)
    } else if ps_ipo <= 4.0 {
        // Interpolate between 0.5 and 1.0.
        0.5 + 0.5 * (ps_ipo - 2.0) / 2.0
    } else {
        1.0
    }
}

/// Compute the valuation feature `f_val` in [0, 1] for a given IPO.
pub fn compute_valuation_feature(ipo: &IpoInput) -> f64 {
    let offer_value = ipo.deal_terms.offer_value();
    let revenue_ttm = ipo.financials.revenue_ttm;

    let ps_ipo = if revenue_ttm > 0.0 {
        Some(offer_value / revenue_ttm)
    } else {
        None
    };

    if let (Some(ps_ipo), Some(sector_ps)) = (ps_ipo, ipo.sector_ps_multiple) {
        if sector_ps > 0.0 {
            let premium = (ps_ipo - sector_ps) / sector_ps;
            return premium.clamp(0.0, 1.0);
        }
    }

    valuation_from_ps_multiple(offer_value, revenue_ttm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DealTerms, FinancialSnapshot};

    fn ipo(offer_value: f64, revenue: f64, sector_ps: Option<f64>) -> IpoInput {
        // price 1.0 midpoint so offer_shares carries the offer value.
        IpoInput {
            ticker: None,
            company_name: None,
            country: None,
            sector: None,
            deal_terms: DealTerms {
                price_low: 1.0,
                price_high: 1.0,
                offer_shares: offer_value as i64,
                free_float_pct: 50.0,
                lockup_days: 180,
            },
            financials: FinancialSnapshot {
                revenue_ttm: revenue,
                gross_margin: 30.0,
                net_margin: 10.0,
                growth_yoy: 20.0,
            },
            underwriter_tier: 3,
            auditor_is_big4: true,
            sector_cyclicality: 1,
            region_risk_tier: 1,
            sector_ps_multiple: sector_ps,
            prospectus_text: None,
        }
    }

    #[test]
    fn heuristic_breakpoints() {
        // PS <= 1 floors at 0.1.
        assert!((compute_valuation_feature(&ipo(1e6, 2e6, None)) - 0.1).abs() < 1e-12);
        // PS = 1.5 interpolates to 0.3.
        assert!((compute_valuation_feature(&ipo(1.5e6, 1e6, None)) - 0.3).abs() < 1e-12);
        // PS = 3 interpolates to 0.75.
        assert!((compute_valuation_feature(&ipo(3e6, 1e6, None)) - 0.75).abs() < 1e-12);
        // PS > 4 saturates.
        assert!((compute_valuation_feature(&ipo(5e6, 1e6, None)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_revenue_is_maximum_risk() {
        assert_eq!(compute_valuation_feature(&ipo(1e6, 0.0, None)), 1.0);
    }

    #[test]
    fn premium_path_wins_when_sector_multiple_present() {
        // PS_ipo = 3, sector PS = 2 -> premium 0.5.
        let v = compute_valuation_feature(&ipo(3e6, 1e6, Some(2.0)));
        assert!((v - 0.5).abs() < 1e-12);
    }

    #[test]
    fn cheaper_than_peers_means_no_premium_risk() {
        // PS_ipo = 1, sector PS = 2 -> negative premium clamps to 0.
        let v = compute_valuation_feature(&ipo(1e6, 1e6, Some(2.0)));
        assert_eq!(v, 0.0);
    }

    #[test]
    fn extreme_premium_clamps_to_one() {
        // PS_ipo = 10, sector PS = 1 -> premium 9 clamps to 1.
        let v = compute_valuation_feature(&ipo(1e7, 1e6, Some(1.0)));
        assert_eq!(v, 1.0);
    }

    #[test]
    fn non_positive_sector_multiple_falls_back_to_heuristic() {
        let v = compute_valuation_feature(&ipo(1.5e6, 1e6, Some(0.0)));
        assert!((v - 0.3).abs() < 1e-12);
    }

    #[test]
    fn zero_revenue_with_sector_multiple_still_maximum_risk() {
        // No PS_ipo exists, so the premium path is unusable.
        let v = compute_valuation_feature(&ipo(1e6, 0.0, Some(2.0)));
        assert_eq!(v, 1.0);
    }
}
