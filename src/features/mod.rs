//! Feature engineering for IPO risk scoring.
//!
//! Each extractor maps a slice of validated input to one or more normalized
//! [0, 1] features and clamps its own outputs before emission. The assembler
//! merges them under a fixed order (liquidity, valuation, quality, context,
//! financials, then textual when text is supplied), and that order drives the
//! display order of risk drivers downstream.
//!
//! Extractors use disjoint feature-name sets; a key collision across
//! extractors is a defect, not an override mechanism.

pub mod context;
pub mod financials;
pub mod liquidity;
pub mod quality;
pub mod textual;
pub mod valuation;

pub use context::compute_context_features;
pub use financials::compute_financial_features;
pub use liquidity::{LiquidityParams, compute_liquidity_features};
pub use quality::compute_quality_features;
pub use textual::compute_textual_features;
pub use valuation::compute_valuation_feature;

use crate::domain::{FeatureVector, IpoInput};

/// Assemble all features into one flat vector with values in [0, 1].
///
/// `prospectus_text` rides along to the textual extractor; when `None`, the
/// `f_text` feature is omitted entirely (callers who want the neutral value
/// can invoke `compute_textual_features` directly).
pub fn build_feature_vector(ipo: &IpoInput, prospectus_text: Option<&str>) -> FeatureVector {
    build_feature_vector_with(ipo, prospectus_text, &LiquidityParams::default())
}

/// `build_feature_vector` with explicit liquidity tunables.
pub fn build_feature_vector_with(
    ipo: &IpoInput,
    prospectus_text: Option<&str>,
    liquidity: &LiquidityParams,
) -> FeatureVector {
    let mut features = FeatureVector::new();
    features.extend(compute_liquidity_features(ipo, liquidity));
    features.insert("f_val", compute_valuation_feature(ipo));
    features.extend(compute_quality_features(ipo));
    features.extend(compute_context_features(ipo));
    features.extend(compute_financial_features(ipo));
    if prospectus_text.is_some() {
        features.extend(compute_textual_features(prospectus_text));
    }
    features
}
