//! Prospectus tone feature `f_text`.
//!
//! A deliberately small lexicon sentiment: tokenize on word boundaries
//! (case-insensitive), count hits against fixed positive/negative word sets,
//! and map `(neg - pos) / tokens` onto [0, 1] around a neutral 0.5. A missing
//! or empty text reads as exactly neutral.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::FeatureVector;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("word pattern is valid"));

const POSITIVE_WORDS: &[&str] = &[
    "growth",
    "profit",
    "strong",
    "expansion",
    "opportunity",
    "increase",
    "robust",
    "competitive",
];

const NEGATIVE_WORDS: &[&str] = &[
    "decline",
    "loss",
    "weak",
    "risk",
    "competition",
    "decrease",
    "uncertain",
    "volatile",
];

/// Compute the textual sentiment feature for optional prospectus text.
pub fn compute_textual_features(prospectus_text: Option<&str>) -> FeatureVector {
    let mut out = FeatureVector::new();

    let Some(text) = prospectus_text.filter(|t| !t.is_empty()) else {
        out.insert("f_text", 0.5);
        return out;
    };

    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = WORD_PATTERN.find_iter(&lowered).map(|m| m.as_str()).collect();
    if tokens.is_empty() {
        out.insert("f_text", 0.5);
        return out;
    }

    let pos_count = tokens.iter().filter(|t| POSITIVE_WORDS.contains(*t)).count();
    let neg_count = tokens.iter().filter(|t| NEGATIVE_WORDS.contains(*t)).count();

    let sentiment = (neg_count as f64 - pos_count as f64) / tokens.len() as f64;
    let f_text = (0.5 + sentiment).clamp(0.0, 1.0);

    out.insert("f_text", f_text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f_text(text: Option<&str>) -> f64 {
        compute_textual_features(text).get("f_text").unwrap()
    }

    #[test]
    fn missing_text_is_exactly_neutral() {
        assert_eq!(f_text(None), 0.5);
    }

    #[test]
    fn empty_and_tokenless_text_is_neutral() {
        assert_eq!(f_text(Some("")), 0.5);
        assert_eq!(f_text(Some("  ... !!! ")), 0.5);
    }

    #[test]
    fn positive_heavy_text_scores_below_neutral() {
        let v = f_text(Some("strong growth and robust profit expansion"));
        assert!(v < 0.5, "got {v}");
    }

    #[test]
    fn negative_heavy_text_scores_above_neutral() {
        let v = f_text(Some("material risk of loss amid weak uncertain volatile markets"));
        assert!(v > 0.5, "got {v}");
    }

    #[test]
    fn tokenization_is_case_insensitive() {
        assert_eq!(
            f_text(Some("RISK LOSS DECLINE")),
            f_text(Some("risk loss decline"))
        );
    }

    #[test]
    fn output_is_clamped_to_unit_interval() {
        // A single negative token maps to 0.5 + 1.0, which clamps to 1.0.
        assert_eq!(f_text(Some("risk")), 1.0);
        // A single positive token maps to 0.5 - 1.0, which clamps to 0.0.
        assert_eq!(f_text(Some("growth")), 0.0);
    }
}
