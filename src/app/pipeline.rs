//! Shared "score pipeline" logic used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load deal JSON -> resolve coefficients -> validate/extract/score -> result

use std::path::Path;

use crate::cli::ScoreArgs;
use crate::domain::{Coefficients, FeatureVector, IpoInput, RiskResult};
use crate::engine::{ScoreOptions, compute_ipo_risk};
use crate::error::AppError;
use crate::features::build_feature_vector;
use crate::io::input::{read_coefficients_json, read_ipo_json, read_text_file};
use crate::model::COEFFS_TEX_EXAMPLE;
use crate::validate::validate_ipo_input;

/// All computed outputs of a single `ipo score` run.
#[derive(Debug, Clone)]
pub struct ScoreRun {
    pub ipo: IpoInput,
    pub result: RiskResult,
}

/// Execute the full scoring pipeline for a deal file.
pub fn run_score(args: &ScoreArgs) -> Result<ScoreRun, AppError> {
    let ipo = read_ipo_json(&args.input)?;

    let coeffs = match (&args.coeffs, args.tex) {
        (Some(path), _) => Some(read_coefficients_json(path)?),
        (None, true) => Some(Coefficients::from_table(COEFFS_TEX_EXAMPLE)),
        (None, false) => None,
    };

    let prospectus_text = match &args.text {
        Some(path) => Some(read_text_file(path)?),
        None => None,
    };

    let opts = ScoreOptions {
        coeffs,
        model_version: args.model_version.clone(),
        include_attractiveness: !args.no_attractiveness,
        prospectus_text,
        ..ScoreOptions::default()
    };

    let result = compute_ipo_risk(&ipo, &opts)?;
    Ok(ScoreRun { ipo, result })
}

/// Load a deal file and return its validated feature vector only.
pub fn run_features(
    input: &Path,
    text: Option<&Path>,
) -> Result<(IpoInput, FeatureVector), AppError> {
    let ipo = read_ipo_json(input)?;
    validate_ipo_input(&ipo)?;

    let override_text = match text {
        Some(path) => Some(read_text_file(path)?),
        None => None,
    };
    let effective_text = override_text.as_deref().or(ipo.prospectus_text.as_deref());

    let features = build_feature_vector(&ipo, effective_text);
    Ok((ipo, features))
}
