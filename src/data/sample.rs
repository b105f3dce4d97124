//! Seeded synthetic labeled-IPO generator.
//!
//! `ipo calibrate` needs a labeled historical dataset; this module fabricates
//! a plausible one so the calibration workflow can be exercised end-to-end
//! without proprietary deal data. Deal shapes are drawn from wide but
//! realistic distributions, and each label is sampled from a latent logistic
//! model over the deal's true features (`COEFFS_V1` as ground truth), so a
//! calibration run against the output has actual signal to recover.
//!
//! Determinism: everything flows from one `StdRng` seed. Same seed, same
//! dataset.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, LogNormal, Normal};

use crate::domain::{Coefficients, DealTerms, FinancialSnapshot, IpoInput};
use crate::error::AppError;
use crate::features::build_feature_vector;
use crate::model::COEFFS_V1;
use crate::validate::validate_ipo_input;

const SECTORS: &[&str] = &[
    "Technology",
    "Healthcare",
    "Construction",
    "Consumer",
    "Financials",
    "Industrials",
    "Energy",
];

const COUNTRIES: &[&str] = &["US", "HK", "CN", "GB", "DE", "SG", "BR"];

/// A generated dataset: deals plus binary outcome labels.
#[derive(Debug, Clone)]
pub struct SampleData {
    pub ipos: Vec<IpoInput>,
    pub targets: Vec<u8>,
}

/// Generate `count` valid IPOs with outcome labels.
pub fn generate_sample(count: usize, seed: u64) -> Result<SampleData, AppError> {
    if count == 0 {
        return Err(AppError::new(4, "Sample count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(seed);

    // Deal-shape distributions. Revenue and share counts are log-normal:
    // most deals are small, a few are very large.
    let revenue_dist: LogNormal<f64> = LogNormal::new(17.0, 1.6).map_err(sample_dist_err)?;
    let shares_dist: LogNormal<f64> = LogNormal::new(15.5, 1.2).map_err(sample_dist_err)?;
    let gross_margin_dist: Normal<f64> = Normal::new(40.0, 15.0).map_err(sample_dist_err)?;
    let net_margin_dist: Normal<f64> = Normal::new(8.0, 12.0).map_err(sample_dist_err)?;
    let growth_dist: Normal<f64> = Normal::new(25.0, 35.0).map_err(sample_dist_err)?;

    let true_coeffs = Coefficients::from_table(COEFFS_V1);

    let mut ipos = Vec::with_capacity(count);
    let mut targets = Vec::with_capacity(count);

    for i in 0..count {
        let price_low: f64 = rng.gen_range(1.0..80.0);
        let price_high = price_low * rng.gen_range(1.0..1.3);

        let offer_shares = (shares_dist.sample(&mut rng) as i64).clamp(50_000, 2_000_000_000);
        const LOCKUPS: [i32; 5] = [0, 90, 180, 180, 365];
        let lockup_days = LOCKUPS[rng.gen_range(0..LOCKUPS.len())];

        let ipo = IpoInput {
            ticker: Some(format!("IPO{i}")),
            company_name: Some(format!("Synthetic Issuer {i}")),
            country: Some(COUNTRIES[rng.gen_range(0..COUNTRIES.len())].to_string()),
            sector: Some(SECTORS[rng.gen_range(0..SECTORS.len())].to_string()),
            deal_terms: DealTerms {
                price_low,
                price_high,
                offer_shares,
                free_float_pct: rng.gen_range(1.0..100.0),
                lockup_days,
            },
            financials: FinancialSnapshot {
                revenue_ttm: revenue_dist.sample(&mut rng).clamp(0.0, 9e11),
                gross_margin: gross_margin_dist.sample(&mut rng).clamp(-100.0, 100.0),
                net_margin: net_margin_dist.sample(&mut rng).clamp(-100.0, 100.0),
                growth_yoy: growth_dist.sample(&mut rng).clamp(-100.0, 300.0),
            },
            underwriter_tier: rng.gen_range(1..=5),
            auditor_is_big4: rng.gen_bool(0.55),
            sector_cyclicality: rng.gen_range(0..=2),
            region_risk_tier: rng.gen_range(0..=2),
            sector_ps_multiple: if rng.gen_bool(0.6) {
                Some(rng.gen_range(0.5..8.0))
            } else {
                None
            },
            prospectus_text: None,
        };

        // The generator must only emit inputs the validator accepts.
        validate_ipo_input(&ipo)?;

        // Latent outcome: logistic over the true features, as a probability.
        let features = build_feature_vector(&ipo, None);
        let mut z = true_coeffs.intercept();
        for (name, value) in features.iter() {
            if let Some(c) = true_coeffs.get(name) {
                z += c * value;
            }
        }
        let p = 1.0 / (1.0 + (-z).exp());
        let label = u8::from(rng.gen_bool(p.clamp(0.001, 0.999)));

        ipos.push(ipo);
        targets.push(label);
    }

    Ok(SampleData { ipos, targets })
}

fn sample_dist_err<E: std::fmt::Debug>(e: E) -> AppError {
    AppError::new(4, format!("Invalid sample distribution parameters: {e:?}"))
}
