//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - constructed from JSON deal files or CSV dataset rows
//! - used in-memory during feature extraction and scoring
//! - exported back to JSON for downstream tooling

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Price range and float structure of the offering.
///
/// Immutable once validated for a given scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealTerms {
    /// Low end of the indicative price range (currency units per share).
    pub price_low: f64,
    /// High end of the indicative price range.
    pub price_high: f64,
    /// Number of shares offered.
    pub offer_shares: i64,
    /// Percentage of shares available for public trading, in [0, 100].
    pub free_float_pct: f64,
    /// Contractual insider lock-up period in days.
    pub lockup_days: i32,
}

impl DealTerms {
    /// Midpoint of the indicative price range.
    pub fn mid_price(&self) -> f64 {
        (self.price_low + self.price_high) / 2.0
    }

    /// Offer value at the midpoint price.
    pub fn offer_value(&self) -> f64 {
        self.mid_price() * self.offer_shares as f64
    }
}

/// Trailing-twelve-month financial snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// TTM revenue (currency units, >= 0).
    pub revenue_ttm: f64,
    /// Gross margin in percent (soft-bounded -100..100).
    pub gross_margin: f64,
    /// Net margin in percent (soft-bounded -100..100).
    pub net_margin: f64,
    /// Year-over-year revenue growth in percent (soft-bounded -100..300).
    pub growth_yoy: f64,
}

/// Full input for one IPO scoring call.
///
/// Created by the caller; read-only to the scoring core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpoInput {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,

    pub deal_terms: DealTerms,
    pub financials: FinancialSnapshot,

    /// Underwriter quality tier in [1, 5]; 1 = top tier, 5 = weakest.
    pub underwriter_tier: i32,
    /// Whether the auditor is one of the Big 4 firms.
    pub auditor_is_big4: bool,
    /// Sector cyclicality code in {0, 1, 2}.
    pub sector_cyclicality: i32,
    /// Region risk tier in {0, 1, 2}.
    pub region_risk_tier: i32,

    /// Peer-group price-to-sales multiple used for the valuation premium path.
    #[serde(default)]
    pub sector_ps_multiple: Option<f64>,

    /// Optional prospectus text for the textual sentiment feature.
    #[serde(default)]
    pub prospectus_text: Option<String>,
}

/// An insertion-ordered map of feature name to normalized value.
///
/// Insertion order is what drives the deterministic display order of risk
/// drivers downstream, so we keep a Vec-backed map rather than a hash map.
/// Feature vocabularies are tiny (well under ten entries), so linear lookup
/// is fine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(String, f64)>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a feature value, preserving first-insertion order.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Feature names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another vector into this one (later values win on shared names).
    ///
    /// Extractors emit disjoint name sets, so in practice this only appends.
    pub fn extend(&mut self, other: FeatureVector) {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A named set of logistic model weights, keyed by feature name.
///
/// The intercept lives under the reserved `"intercept"` key. Any feature name
/// absent from the set contributes zero to the score and is excluded from the
/// drivers list. Like `FeatureVector`, this preserves insertion order so
/// exported coefficient files stay stable and diffable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coefficients {
    entries: Vec<(String, f64)>,
}

impl Coefficients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a static table such as `model::COEFFS_V1`.
    pub fn from_table(table: &[(&str, f64)]) -> Self {
        let mut out = Self::new();
        for &(name, value) in table {
            out.insert(name, value);
        }
        out
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Intercept weight, defaulting to 0 when absent.
    pub fn intercept(&self) -> f64 {
        self.get("intercept").unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Coefficients {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Coefficients {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CoeffVisitor;

        impl<'de> Visitor<'de> for CoeffVisitor {
            type Value = Coefficients;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of feature name to coefficient")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = Coefficients::new();
                while let Some((name, value)) = access.next_entry::<String, f64>()? {
                    out.insert(name, value);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(CoeffVisitor)
    }
}

/// One feature's labeled contribution to the final score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskDriver {
    /// Feature key (stable vocabulary, e.g. `f_liq_total`).
    pub name: String,
    /// Coefficient × feature value, rounded for display.
    pub contribution_points: f64,
    /// Human-readable explanation of the contribution.
    pub description: String,
}

/// Full output of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskResult {
    /// Bounded risk score in [0, 100].
    pub risk_score: f64,
    /// Complementary metric `100 - risk_score`; `None` when disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attractiveness_percent: Option<f64>,
    /// Identifier of the coefficient set / model revision used.
    pub model_version: String,
    /// One driver per scored feature, in feature insertion order.
    pub drivers: Vec<RiskDriver>,
    /// The full feature vector, including features the active coefficient set
    /// does not weight.
    pub raw_features: FeatureVector,
}
