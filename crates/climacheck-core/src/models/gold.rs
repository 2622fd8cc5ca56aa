use serde::{Deserialize, Serialize};

use super::{EntailmentLabel, RelevantTarget};
use crate::errors::{ClimacheckResult, ValidationError};

/// One line of a gold set: a claim, the passage that answers it, and the
/// entailment relation between them.
///
/// An entry with neither `evidence` nor `entailment` is a control case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub claim: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entailment: Option<String>,
}

impl GoldEntry {
    pub fn new(id: impl Into<String>, claim: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            claim: claim.into(),
            evidence: None,
            entailment: None,
        }
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    pub fn with_entailment(mut self, entailment: impl Into<String>) -> Self {
        self.entailment = Some(entailment.into());
        self
    }

    pub fn is_control(&self) -> bool {
        self.evidence.is_none() && self.entailment.is_none()
    }

    /// What retrieval should return for this claim.
    ///
    /// `None` when an entailment is given without usable evidence; such
    /// entries cannot be scored.
    pub fn relevant_target(&self) -> Option<RelevantTarget> {
        match self.evidence.as_deref() {
            Some(id) if !id.is_empty() => Some(RelevantTarget::Passage(id.to_string())),
            _ if self.is_control() => Some(RelevantTarget::Control),
            _ => None,
        }
    }

    /// The normalized entailment label, if one is present.
    pub fn entailment_label(&self) -> ClimacheckResult<Option<EntailmentLabel>> {
        match self.entailment.as_deref() {
            None => Ok(None),
            Some(raw) => EntailmentLabel::parse_loose(raw).map(Some).ok_or_else(|| {
                ValidationError::UnrecognizedLabel {
                    label: raw.to_string(),
                }
                .into()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_rules() {
        let control = GoldEntry::new("g", "claim");
        assert_eq!(control.relevant_target(), Some(RelevantTarget::Control));

        let evidence_only = GoldEntry::new("g", "claim").with_evidence("p1");
        assert_eq!(
            evidence_only.relevant_target(),
            Some(RelevantTarget::Passage("p1".into()))
        );

        let label_only = GoldEntry::new("g", "claim").with_entailment("supports");
        assert_eq!(label_only.relevant_target(), None);

        let blank_evidence = GoldEntry::new("g", "claim").with_evidence("");
        assert!(!blank_evidence.is_control());
        assert_eq!(blank_evidence.relevant_target(), None);
    }

    #[test]
    fn labels_normalize_or_fail() {
        let e = GoldEntry::new("g", "c").with_entailment("REFUTES");
        assert_eq!(e.entailment_label().unwrap(), Some(EntailmentLabel::Contradiction));
        let bad = GoldEntry::new("g", "c").with_entailment("maybe");
        assert!(bad.entailment_label().is_err());
        assert_eq!(GoldEntry::new("g", "c").entailment_label().unwrap(), None);
    }
}
