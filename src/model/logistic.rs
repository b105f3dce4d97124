//! Logistic risk scoring.
//!
//! `score = 100 / (1 + e^(-z))` with `z = intercept + Σ coeff[name] · value`
//! over the features that the active coefficient set weights. Linear-in-features
//! keeps every term individually explainable as a driver, and the sigmoid keeps
//! the score bounded and smoothly saturating.
//!
//! Defensive checks are independent of the input validator: every feature
//! value reaching the scorer must be finite and inside the safe envelope
//! `[FEATURE_MIN_SAFE, FEATURE_MAX_SAFE]`, even if a caller bypassed the
//! standard feature builder. Violations fail the whole call with exit code 3,
//! never a partial or clamped result.

use crate::domain::{Coefficients, FeatureVector};
use crate::error::AppError;

/// Heuristic coefficients for model version v1.
///
/// These should be calibrated with historical data (see `calib`).
pub const COEFFS_V1: &[(&str, f64)] = &[
    ("intercept", -0.5),
    ("f_liq_total", 2.0),
    ("f_val", 1.0),
    ("f_uw", 1.5),
    ("f_aud", 1.5),
    ("f_geo", 1.0),
    ("f_fin", 1.0),
];

/// Alternate coefficient set following the worked example in the reference
/// paper; unlike `COEFFS_V1` it also weights the textual sentiment feature.
pub const COEFFS_TEX_EXAMPLE: &[(&str, f64)] = &[
    ("intercept", -1.2),
    ("f_liq_total", 1.8),
    ("f_val", 1.2),
    ("f_uw", 1.1),
    ("f_aud", 0.9),
    ("f_geo", 1.0),
    ("f_fin", 1.3),
    ("f_text", 0.7),
];

/// Clip for the logit; protects `exp` from overflow on extreme inputs by
/// saturating the sigmoid instead of erroring.
pub const LOGIT_CLIP: f64 = 30.0;

/// Safe bounds for feature values. Features are expected in [0, 1] but we
/// allow slack to tolerate small numerical noise.
pub const FEATURE_MIN_SAFE: f64 = -1.0;
pub const FEATURE_MAX_SAFE: f64 = 2.0;

/// Numerically bounded logistic function on a pre-clipped logit.
fn logistic(z: f64) -> Result<f64, AppError> {
    if !z.is_finite() {
        return Err(AppError::feature_range(format!(
            "Non-finite logit value: {z}"
        )));
    }

    let z_clipped = z.clamp(-LOGIT_CLIP, LOGIT_CLIP);
    Ok(1.0 / (1.0 + (-z_clipped).exp()))
}

/// Ensure a feature value is finite and within the safe envelope.
fn validate_feature_value(name: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::feature_range(format!(
            "Feature '{name}' is non-finite: {value}"
        )));
    }

    if !(FEATURE_MIN_SAFE..=FEATURE_MAX_SAFE).contains(&value) {
        return Err(AppError::feature_range(format!(
            "Feature '{name}' has suspicious value {value}; \
             expected in [{FEATURE_MIN_SAFE}, {FEATURE_MAX_SAFE}]"
        )));
    }

    Ok(())
}

/// Compute a bounded risk score in [0, 100] from a normalized feature vector.
///
/// Feature names absent from `coeffs` are skipped (not an error), but every
/// value is range-checked before summing; any violation aborts the call.
pub fn risk_score_from_features(
    features: &FeatureVector,
    coeffs: &Coefficients,
) -> Result<f64, AppError> {
    let mut z = coeffs.intercept();

    for (name, value) in features.iter() {
        validate_feature_value(name, value)?;
        let Some(coeff) = coeffs.get(name) else {
            continue;
        };
        z += coeff * value;
    }

    let p = logistic(z)?;
    // Risk is higher when the logistic probability is higher.
    Ok(100.0 * p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coeffs_v1() -> Coefficients {
        Coefficients::from_table(COEFFS_V1)
    }

    fn normal_features() -> FeatureVector {
        let mut fv = FeatureVector::new();
        fv.insert("f_liq_total", 0.5);
        fv.insert("f_val", 0.2);
        fv.insert("f_uw", 0.3);
        fv.insert("f_aud", 0.0);
        fv.insert("f_geo", 0.4);
        fv.insert("f_fin", 0.25);
        fv
    }

    #[test]
    fn accepts_normal_feature_vector() {
        let score = risk_score_from_features(&normal_features(), &coeffs_v1()).unwrap();
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn rejects_non_finite_feature() {
        let mut fv = FeatureVector::new();
        fv.insert("f_liq_total", f64::INFINITY);
        let err = risk_score_from_features(&fv, &coeffs_v1()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn rejects_out_of_envelope_feature() {
        let mut fv = FeatureVector::new();
        fv.insert("f_liq_total", FEATURE_MAX_SAFE + 10.0);
        let err = risk_score_from_features(&fv, &coeffs_v1()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn rejects_even_unweighted_out_of_envelope_feature() {
        // Range checks run before the coefficient lookup, so a feature the
        // model ignores still cannot smuggle in garbage.
        let mut fv = normal_features();
        fv.insert("f_unknown", -50.0);
        assert!(risk_score_from_features(&fv, &coeffs_v1()).is_err());
    }

    #[test]
    fn unknown_feature_names_are_skipped() {
        let mut fv = normal_features();
        fv.insert("f_novel", 0.5);
        let base = risk_score_from_features(&normal_features(), &coeffs_v1()).unwrap();
        let with_novel = risk_score_from_features(&fv, &coeffs_v1()).unwrap();
        assert_eq!(base, with_novel);
    }

    #[test]
    fn envelope_slack_is_tolerated() {
        let mut fv = FeatureVector::new();
        fv.insert("f_liq_total", -0.999);
        fv.insert("f_val", 1.999);
        assert!(risk_score_from_features(&fv, &coeffs_v1()).is_ok());
    }

    #[test]
    fn score_saturates_instead_of_overflowing() {
        // Enormous coefficients produce a huge logit; the clip keeps the
        // result finite and at the boundary.
        let mut coeffs = Coefficients::new();
        coeffs.insert("intercept", 1e9);
        let score = risk_score_from_features(&normal_features(), &coeffs).unwrap();
        assert!((score - 100.0).abs() < 1e-9);

        let mut coeffs = Coefficients::new();
        coeffs.insert("intercept", -1e9);
        let score = risk_score_from_features(&normal_features(), &coeffs).unwrap();
        assert!(score < 1e-9);
    }

    #[test]
    fn empty_coefficients_give_the_sigmoid_midpoint() {
        let score = risk_score_from_features(&normal_features(), &Coefficients::new()).unwrap();
        assert!((score - 50.0).abs() < 1e-12);
    }

    #[test]
    fn score_bounded_over_envelope_grid() {
        // Any combination of envelope-edge values stays inside [0, 100].
        for &a in &[FEATURE_MIN_SAFE, 0.0, 1.0, FEATURE_MAX_SAFE] {
            for &b in &[FEATURE_MIN_SAFE, 0.0, 1.0, FEATURE_MAX_SAFE] {
                let mut fv = FeatureVector::new();
                fv.insert("f_liq_total", a);
                fv.insert("f_uw", b);
                let score = risk_score_from_features(&fv, &coeffs_v1()).unwrap();
                assert!((0.0..=100.0).contains(&score));
            }
        }
    }
}
