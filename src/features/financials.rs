//! Financial health feature `f_fin`.
//!
//! Average of two partial risks, each piecewise linear:
//!
//! - `risk_net`: net margin <= 0% reads 1.0, >= 20% reads 0.0, linear between.
//! - `risk_growth`: YoY growth <= 0% reads 1.0, >= 50% reads 0.0, linear between.

use crate::domain::{FeatureVector, IpoInput};

pub fn compute_financial_features(ipo: &IpoInput) -> FeatureVector {
    let net_margin = ipo.financials.net_margin;
    let growth = ipo.financials.growth_yoy;

    let risk_net = if net_margin <= 0.0 {
        1.0
    } else if net_margin >= 20.0 {
        0.0
    } else {
        1.0 - net_margin / 20.0
    };

    let risk_growth = if growth <= 0.0 {
        1.0
    } else if growth >= 50.0 {
        0.0
    } else {
        1.0 - growth / 50.0
    };

    let f_fin = ((risk_net + risk_growth) / 2.0).clamp(0.0, 1.0);

    let mut out = FeatureVector::new();
    out.insert("f_fin", f_fin);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DealTerms, FinancialSnapshot};

    fn ipo(net_margin: f64, growth: f64) -> IpoInput {
        IpoInput {
            ticker: None,
            company_name: None,
            country: None,
            sector: None,
            deal_terms: DealTerms {
                price_low: 10.0,
                price_high: 12.0,
                offer_shares: 1_000_000,
                free_float_pct: 40.0,
                lockup_days: 180,
            },
            financials: FinancialSnapshot {
                revenue_ttm: 50_000_000.0,
                gross_margin: 40.0,
                net_margin,
                growth_yoy: growth,
            },
            underwriter_tier: 2,
            auditor_is_big4: true,
            sector_cyclicality: 0,
            region_risk_tier: 0,
            sector_ps_multiple: None,
            prospectus_text: None,
        }
    }

    fn f_fin(net_margin: f64, growth: f64) -> f64 {
        compute_financial_features(&ipo(net_margin, growth))
            .get("f_fin")
            .unwrap()
    }

    #[test]
    fn loss_making_no_growth_is_maximum_risk() {
        assert_eq!(f_fin(-5.0, -10.0), 1.0);
        assert_eq!(f_fin(0.0, 0.0), 1.0);
    }

    #[test]
    fn strong_margins_and_growth_is_minimum_risk() {
        assert_eq!(f_fin(20.0, 50.0), 0.0);
        assert_eq!(f_fin(35.0, 120.0), 0.0);
    }

    #[test]
    fn interior_values_interpolate() {
        // risk_net = 1 - 10/20 = 0.5; risk_growth = 1 - 25/50 = 0.5.
        assert!((f_fin(10.0, 25.0) - 0.5).abs() < 1e-12);
        // risk_net = 1 - 12.6/20 = 0.37; risk_growth = 1 - 43.9/50 = 0.122.
        assert!((f_fin(12.6, 43.9) - 0.246).abs() < 1e-12);
    }

    #[test]
    fn mixed_profile_averages_the_partials() {
        // Profitable but shrinking: risk_net = 0, risk_growth = 1.
        assert!((f_fin(25.0, -5.0) - 0.5).abs() < 1e-12);
    }
}
