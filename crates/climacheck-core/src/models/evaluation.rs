use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use super::Passage;
use crate::constants::CONTROL_SENTINEL;

/// What a query should have retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelevantTarget {
    Passage(String),
    /// No evidence exists; the correct answer is an empty retrieval.
    Control,
}

impl RelevantTarget {
    pub fn is_control(&self) -> bool {
        matches!(self, Self::Control)
    }
}

impl From<String> for RelevantTarget {
    fn from(raw: String) -> Self {
        if raw == CONTROL_SENTINEL {
            Self::Control
        } else {
            Self::Passage(raw)
        }
    }
}

impl From<RelevantTarget> for String {
    fn from(target: RelevantTarget) -> Self {
        match target {
            RelevantTarget::Passage(id) => id,
            RelevantTarget::Control => CONTROL_SENTINEL.to_string(),
        }
    }
}

/// One scored query: what came back and what should have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationPair {
    pub retrieved: Vec<Passage>,
    pub relevant: RelevantTarget,
}

impl EvaluationPair {
    pub fn new(retrieved: Vec<Passage>, relevant: RelevantTarget) -> Self {
        Self {
            retrieved,
            relevant,
        }
    }

    pub fn retrieved_ids(&self) -> Vec<&str> {
        self.retrieved.iter().map(|p| p.id.as_str()).collect()
    }
}

/// The five IR metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Recall,
    Precision,
    F1,
    Mrr,
    Ndcg,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Recall,
        Metric::Precision,
        Metric::F1,
        Metric::Mrr,
        Metric::Ndcg,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recall => "recall",
            Self::Precision => "precision",
            Self::F1 => "f1",
            Self::Mrr => "mrr",
            Self::Ndcg => "ndcg",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metric values at a single cutoff, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricScores {
    pub recall: f64,
    pub precision: f64,
    pub f1: f64,
    pub mrr: f64,
    pub ndcg: f64,
}

impl MetricScores {
    /// Every metric set to the same value.
    pub fn uniform(value: f64) -> Self {
        Self {
            recall: value,
            precision: value,
            f1: value,
            mrr: value,
            ndcg: value,
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Recall => self.recall,
            Metric::Precision => self.precision,
            Metric::F1 => self.f1,
            Metric::Mrr => self.mrr,
            Metric::Ndcg => self.ndcg,
        }
    }

    pub fn get_mut(&mut self, metric: Metric) -> &mut f64 {
        match metric {
            Metric::Recall => &mut self.recall,
            Metric::Precision => &mut self.precision,
            Metric::F1 => &mut self.f1,
            Metric::Mrr => &mut self.mrr,
            Metric::Ndcg => &mut self.ndcg,
        }
    }
}

/// Per-cutoff metric scores. Serialized with `k_{k}` keys in ascending k.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricResult {
    by_k: BTreeMap<usize, MetricScores>,
}

impl MetricResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, k: usize, scores: MetricScores) {
        self.by_k.insert(k, scores);
    }

    pub fn get(&self, k: usize) -> Option<&MetricScores> {
        self.by_k.get(&k)
    }

    pub fn score(&self, k: usize, metric: Metric) -> Option<f64> {
        self.get(k).map(|s| s.get(metric))
    }

    pub fn cutoffs(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_k.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &MetricScores)> {
        self.by_k.iter().map(|(k, s)| (*k, s))
    }

    pub fn len(&self) -> usize {
        self.by_k.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_k.is_empty()
    }
}

impl FromIterator<(usize, MetricScores)> for MetricResult {
    fn from_iter<I: IntoIterator<Item = (usize, MetricScores)>>(iter: I) -> Self {
        Self {
            by_k: iter.into_iter().collect(),
        }
    }
}

impl Serialize for MetricResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.by_k.len()))?;
        for (k, scores) in &self.by_k {
            map.serialize_entry(&format!("k_{k}"), scores)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MetricResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyedVisitor;

        impl<'de> Visitor<'de> for KeyedVisitor {
            type Value = MetricResult;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map keyed by k_<cutoff>")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut result = MetricResult::new();
                while let Some((key, scores)) = access.next_entry::<String, MetricScores>()? {
                    let k = key
                        .strip_prefix("k_")
                        .and_then(|n| n.parse::<usize>().ok())
                        .ok_or_else(|| de::Error::custom(format!("bad cutoff key {key}")))?;
                    result.insert(k, scores);
                }
                Ok(result)
            }
        }

        deserializer.deserialize_map(KeyedVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_sentinel_roundtrips() {
        let target: RelevantTarget = serde_json::from_str("\"__CONTROL_CASE__\"").unwrap();
        assert!(target.is_control());
        assert_eq!(serde_json::to_string(&target).unwrap(), "\"__CONTROL_CASE__\"");
        let target: RelevantTarget = serde_json::from_str("\"p7\"").unwrap();
        assert_eq!(target, RelevantTarget::Passage("p7".to_string()));
    }

    #[test]
    fn metric_result_uses_k_keys_in_numeric_order() {
        let result: MetricResult = [(10, MetricScores::uniform(0.5)), (3, MetricScores::uniform(1.0))]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.find("k_3").unwrap() < json.find("k_10").unwrap());
        let back: MetricResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn bad_cutoff_key_rejected() {
        let json = r#"{"top3":{"recall":0,"precision":0,"f1":0,"mrr":0,"ndcg":0}}"#;
        assert!(serde_json::from_str::<MetricResult>(json).is_err());
    }
}
