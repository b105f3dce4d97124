//! Deal and reporting quality features.
//!
//! - `f_uw`: underwriter quality: `(tier - 1) / 4`, so tier 1 (top bracket)
//!   reads as zero risk and tier 5 as full risk.
//! - `f_aud`: auditor quality: 0 for a Big 4 auditor, 1 otherwise.

use crate::domain::{FeatureVector, IpoInput};

pub fn compute_quality_features(ipo: &IpoInput) -> FeatureVector {
    // underwriter_tier is validated into [1, 5] where 1 = best, 5 = weakest.
    let f_uw = ((ipo.underwriter_tier - 1) as f64 / 4.0).clamp(0.0, 1.0);
    let f_aud = if ipo.auditor_is_big4 { 0.0 } else { 1.0 };

    let mut out = FeatureVector::new();
    out.insert("f_uw", f_uw);
    out.insert("f_aud", f_aud);
    out
}
