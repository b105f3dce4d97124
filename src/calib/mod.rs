//! Coefficient calibration from labeled historical IPOs.
//!
//! The default coefficient sets in `model` are heuristic placeholders. Given
//! historical IPOs and a binary outcome per deal (for example, traded below
//! offer within a year), this module fits logistic-regression weights that
//! plug straight back into the scorer.
//!
//! The fit is iteratively reweighted least squares (Newton–Raphson): each
//! step solves a weighted linear system on the working response, with an L2
//! ridge penalty on the non-intercept weights. Ridge keeps the problem
//! well-posed when a feature is constant across the dataset or the classes
//! are perfectly separable.
//!
//! Feature vectors come from `features::build_feature_vector`, so calibrated
//! weights always share the scorer's feature vocabulary.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::domain::{Coefficients, FeatureVector, IpoInput};
use crate::error::AppError;
use crate::features::build_feature_vector;
use crate::validate::validate_ipo_input;

/// Knobs for `fit_coefficients`.
#[derive(Debug, Clone)]
pub struct CalibOptions {
    /// L2 penalty strength on non-intercept weights. Must be > 0; a separable
    /// dataset has no finite unpenalized optimum.
    pub ridge: f64,
    /// Maximum IRLS iterations before declaring non-convergence.
    pub max_iters: usize,
    /// Convergence threshold on the max absolute coefficient step.
    pub tol: f64,
}

impl Default for CalibOptions {
    fn default() -> Self {
        Self {
            ridge: 1.0,
            max_iters: 50,
            tol: 1e-8,
        }
    }
}

/// Fit logistic coefficients from a labeled IPO dataset.
///
/// `targets` are per-deal outcomes in {0, 1} (1 = realized high risk). The
/// returned map holds the intercept under `"intercept"` followed by one
/// weight per feature, in feature-vocabulary order; it is directly usable as
/// the coefficient set of a scoring call.
pub fn fit_coefficients(
    ipos: &[IpoInput],
    targets: &[u8],
    opts: &CalibOptions,
) -> Result<Coefficients, AppError> {
    if ipos.is_empty() {
        return Err(AppError::new(4, "Calibration requires at least one observation."));
    }
    if ipos.len() != targets.len() {
        return Err(AppError::new(
            4,
            format!(
                "Calibration inputs are misaligned: {} IPOs vs {} targets.",
                ipos.len(),
                targets.len()
            ),
        ));
    }
    if targets.iter().any(|&t| t > 1) {
        return Err(AppError::new(4, "Calibration targets must be 0 or 1."));
    }
    if targets.iter().all(|&t| t == 0) || targets.iter().all(|&t| t == 1) {
        return Err(AppError::new(
            4,
            "Calibration requires both outcome classes to be present.",
        ));
    }
    if !(opts.ridge > 0.0) || !opts.ridge.is_finite() {
        return Err(AppError::new(4, "Calibration ridge penalty must be > 0."));
    }

    // Validate every observation before touching numeric code, then build the
    // feature rows. Feature building is pure per row, so rows go wide.
    for ipo in ipos {
        validate_ipo_input(ipo)?;
    }
    let rows: Vec<FeatureVector> = ipos
        .par_iter()
        .map(|ipo| build_feature_vector(ipo, ipo.prospectus_text.as_deref()))
        .collect();

    // Vocabulary: first-seen feature order across the dataset. Rows missing a
    // name (e.g. deals without prospectus text) contribute zero for it.
    let mut names: Vec<String> = Vec::new();
    for row in &rows {
        for name in row.names() {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }

    let n = rows.len();
    let p = names.len();

    // Design matrix with an explicit leading intercept column.
    let mut x = DMatrix::zeros(n, p + 1);
    for (i, row) in rows.iter().enumerate() {
        x[(i, 0)] = 1.0;
        for (j, name) in names.iter().enumerate() {
            x[(i, j + 1)] = row.get(name).unwrap_or(0.0);
        }
    }
    let y: Vec<f64> = targets.iter().map(|&t| t as f64).collect();

    let beta = irls(&x, &y, opts)?;

    let mut out = Coefficients::new();
    out.insert("intercept", beta[0]);
    for (j, name) in names.iter().enumerate() {
        out.insert(name.clone(), beta[j + 1]);
    }
    Ok(out)
}

/// IRLS loop: returns the converged coefficient vector (intercept first).
fn irls(x: &DMatrix<f64>, y: &[f64], opts: &CalibOptions) -> Result<DVector<f64>, AppError> {
    let n = x.nrows();
    let k = x.ncols();
    let sqrt_ridge = opts.ridge.sqrt();

    // Working-weight floor; keeps saturated observations from zeroing rows.
    const W_FLOOR: f64 = 1e-6;

    let mut beta = DVector::zeros(k);

    for _ in 0..opts.max_iters {
        // Augmented system: n data rows plus one ridge row per non-intercept
        // coefficient (sqrt(λ)·β_j pulled toward 0, at unit weight).
        let mut xa = DMatrix::zeros(n + (k - 1), k);
        let mut za = DVector::zeros(n + (k - 1));
        let mut weights = vec![1.0; n + (k - 1)];

        for i in 0..n {
            let eta: f64 = (0..k).map(|j| x[(i, j)] * beta[j]).sum();
            let mu = 1.0 / (1.0 + (-eta.clamp(-30.0, 30.0)).exp());
            let w = (mu * (1.0 - mu)).max(W_FLOOR);

            for j in 0..k {
                xa[(i, j)] = x[(i, j)];
            }
            za[i] = eta + (y[i] - mu) / w;
            weights[i] = w;
        }
        for j in 1..k {
            xa[(n + j - 1, j)] = sqrt_ridge;
        }

        let next = solve_step(&xa, &za, &weights)?;
        let step = (&next - &beta).amax();
        beta = next;

        if step < opts.tol {
            return Ok(beta);
        }
    }

    Err(AppError::new(
        4,
        format!(
            "Calibration did not converge within {} iterations; \
             try a larger ridge penalty or more iterations.",
            opts.max_iters
        ),
    ))
}

fn solve_step(
    x: &DMatrix<f64>,
    z: &DVector<f64>,
    weights: &[f64],
) -> Result<DVector<f64>, AppError> {
    crate::math::solve_weighted_least_squares(x, z, weights).ok_or_else(|| {
        AppError::new(
            4,
            "Calibration step is too ill-conditioned to solve; check for duplicate features.",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DealTerms, FinancialSnapshot};
    use crate::model::risk_score_from_features;

    /// A valid mid-of-the-road IPO whose quality tier we vary per test.
    fn ipo_with_tier(tier: i32) -> IpoInput {
        IpoInput {
            ticker: None,
            company_name: None,
            country: None,
            sector: None,
            deal_terms: DealTerms {
                price_low: 10.0,
                price_high: 12.0,
                offer_shares: 5_000_000,
                free_float_pct: 40.0,
                lockup_days: 90,
            },
            financials: FinancialSnapshot {
                revenue_ttm: 60_000_000.0,
                gross_margin: 40.0,
                net_margin: 8.0,
                growth_yoy: 20.0,
            },
            underwriter_tier: tier,
            auditor_is_big4: true,
            sector_cyclicality: 1,
            region_risk_tier: 1,
            sector_ps_multiple: Some(2.0),
            prospectus_text: None,
        }
    }

    fn separable_dataset() -> (Vec<IpoInput>, Vec<u8>) {
        let mut ipos = Vec::new();
        let mut targets = Vec::new();
        for _ in 0..20 {
            ipos.push(ipo_with_tier(1));
            targets.push(0);
            ipos.push(ipo_with_tier(5));
            targets.push(1);
        }
        (ipos, targets)
    }

    #[test]
    fn recovers_the_separating_feature_sign() {
        let (ipos, targets) = separable_dataset();
        let coeffs = fit_coefficients(&ipos, &targets, &CalibOptions::default()).unwrap();

        // f_uw is the only feature that differs between the classes, so its
        // fitted weight must be positive and dominant.
        let f_uw = coeffs.get("f_uw").unwrap();
        assert!(f_uw > 0.5, "expected a clearly positive f_uw, got {f_uw}");
    }

    #[test]
    fn fitted_coefficients_separate_the_classes_through_the_scorer() {
        let (ipos, targets) = separable_dataset();
        let coeffs = fit_coefficients(&ipos, &targets, &CalibOptions::default()).unwrap();

        let low = build_feature_vector(&ipo_with_tier(1), None);
        let high = build_feature_vector(&ipo_with_tier(5), None);
        let score_low = risk_score_from_features(&low, &coeffs).unwrap();
        let score_high = risk_score_from_features(&high, &coeffs).unwrap();
        assert!(score_high > score_low);
    }

    #[test]
    fn vocabulary_matches_the_feature_builder() {
        let (ipos, targets) = separable_dataset();
        let coeffs = fit_coefficients(&ipos, &targets, &CalibOptions::default()).unwrap();

        let fv = build_feature_vector(&ipos[0], None);
        for name in fv.names() {
            assert!(coeffs.get(name).is_some(), "missing weight for {name}");
        }
        assert!(coeffs.get("intercept").is_some());
    }

    #[test]
    fn rejects_misaligned_inputs() {
        let (ipos, mut targets) = separable_dataset();
        targets.pop();
        let err = fit_coefficients(&ipos, &targets, &CalibOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn rejects_single_class_targets() {
        let (ipos, _) = separable_dataset();
        let targets = vec![1u8; ipos.len()];
        let err = fit_coefficients(&ipos, &targets, &CalibOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn rejects_non_binary_targets() {
        let (ipos, mut targets) = separable_dataset();
        targets[0] = 2;
        assert!(fit_coefficients(&ipos, &targets, &CalibOptions::default()).is_err());
    }

    #[test]
    fn rejects_empty_dataset() {
        let err = fit_coefficients(&[], &[], &CalibOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn propagates_validation_failures_from_observations() {
        let (mut ipos, targets) = separable_dataset();
        ipos[0].deal_terms.free_float_pct = -5.0;
        let err = fit_coefficients(&ipos, &targets, &CalibOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
