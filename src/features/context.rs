//! Contextual risk: sector cyclicality plus geographic risk.
//!
//! `f_geo = (sector_cyclicality + region_risk_tier) / 4`, clamped to [0, 1].
//! Both codes are validated into {0, 1, 2} upstream, so the maximum raw sum
//! is 4 and the feature spans the full unit interval.

use crate::domain::{FeatureVector, IpoInput};

pub fn compute_context_features(ipo: &IpoInput) -> FeatureVector {
    let s = ipo.sector_cyclicality;
    let g = ipo.region_risk_tier;

    let f_geo = ((s + g) as f64 / 4.0).clamp(0.0, 1.0);

    let mut out = FeatureVector::new();
    out.insert("f_geo", f_geo);
    out
}
