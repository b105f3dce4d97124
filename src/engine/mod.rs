//! Scoring orchestration.
//!
//! Data flows strictly one way: raw input → validated input → feature vector
//! → score + drivers → `RiskResult`. Every step is a pure function of its
//! explicit inputs, so concurrent callers need no coordination.

use crate::domain::{Coefficients, IpoInput, RiskDriver, RiskResult};
use crate::error::AppError;
use crate::features::{LiquidityParams, build_feature_vector_with};
use crate::model::{COEFFS_V1, risk_score_from_features};
use crate::validate::validate_ipo_input;

/// Default model version identifier.
pub const MODEL_VERSION: &str = "v1-logistic";

/// Named, optional overrides for one scoring call.
///
/// Each field has a stated default; callers override only what they need.
#[derive(Debug, Clone)]
pub struct ScoreOptions {
    /// Coefficient set to use; defaults to `COEFFS_V1`.
    pub coeffs: Option<Coefficients>,
    /// Model version string for the result; defaults to `MODEL_VERSION`.
    pub model_version: Option<String>,
    /// Whether to compute `attractiveness_percent = 100 - risk`; default true.
    pub include_attractiveness: bool,
    /// Prospectus text override. When `None`, any text carried on the input
    /// itself is used instead.
    pub prospectus_text: Option<String>,
    /// Liquidity feature tunables.
    pub liquidity: LiquidityParams,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            coeffs: None,
            model_version: None,
            include_attractiveness: true,
            prospectus_text: None,
            liquidity: LiquidityParams::default(),
        }
    }
}

/// Round a driver contribution for display.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// High-level API: validate IPO input, compute features, score risk, and
/// return an explainable `RiskResult`.
///
/// Fails with exit code 2 on invalid input and exit code 3 if any feature
/// value reaches the scorer outside the safe numeric envelope.
pub fn compute_ipo_risk(ipo: &IpoInput, opts: &ScoreOptions) -> Result<RiskResult, AppError> {
    validate_ipo_input(ipo)?;

    // An explicit text override wins over text carried on the input.
    let text = opts
        .prospectus_text
        .as_deref()
        .or(ipo.prospectus_text.as_deref());
    let features = build_feature_vector_with(ipo, text, &opts.liquidity);

    let default_coeffs;
    let coeffs = match &opts.coeffs {
        Some(c) => c,
        None => {
            default_coeffs = Coefficients::from_table(COEFFS_V1);
            &default_coeffs
        }
    };

    let risk = risk_score_from_features(&features, coeffs)?;
    let attractiveness = opts.include_attractiveness.then(|| 100.0 - risk);

    // One driver per feature the active coefficient set weights; unweighted
    // features stay visible in `raw_features` only.
    let mut drivers = Vec::new();
    for (name, value) in features.iter() {
        let Some(coeff) = coeffs.get(name) else {
            continue;
        };
        let contribution = coeff * value;
        drivers.push(RiskDriver {
            name: name.to_string(),
            contribution_points: round4(contribution),
            description: format!(
                "{name}: value {value:.2} * weight {coeff:.2} ~ {contribution:.3} logit points",
            ),
        });
    }

    Ok(RiskResult {
        risk_score: risk,
        attractiveness_percent: attractiveness,
        model_version: opts
            .model_version
            .clone()
            .unwrap_or_else(|| MODEL_VERSION.to_string()),
        drivers,
        raw_features: features,
    })
}
