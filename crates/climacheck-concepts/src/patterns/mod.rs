//! Compiled pattern catalogs: climate patterns, domain rules, exact phrases.
//!
//! Tables are compiled once on first use. A pattern that fails to compile is
//! logged and left out; it can never match, which is the same outcome as the
//! text not containing it.

mod catalog;
mod ruler;

use std::sync::LazyLock;

use climacheck_core::models::{Concept, ExtractionSource};
use regex::Regex;
use tracing::warn;

use catalog::{DOMAIN_RULE_TABLE, PATTERN_TABLE};

pub use ruler::{match_phrases, phrase_count};

/// Concept type for a pattern key missing from the catalog.
pub const UNKNOWN_TYPE: &str = "UNKNOWN";

/// One compiled entry of the climate pattern catalog.
#[derive(Debug)]
pub struct CompiledPattern {
    pub key: &'static str,
    pub concept_type: &'static str,
    pub regex: Regex,
}

/// One compiled climate-domain rule.
#[derive(Debug)]
pub struct DomainRule {
    pub concept_type: &'static str,
    pub regex: Regex,
}

static PATTERNS: LazyLock<Vec<CompiledPattern>> = LazyLock::new(|| {
    PATTERN_TABLE
        .iter()
        .filter_map(|(key, concept_type, source)| match Regex::new(source) {
            Ok(regex) => Some(CompiledPattern {
                key,
                concept_type,
                regex,
            }),
            Err(e) => {
                warn!(pattern = key, error = %e, "pattern failed to compile, skipping");
                None
            }
        })
        .collect()
});

static DOMAIN_RULES: LazyLock<Vec<DomainRule>> = LazyLock::new(|| {
    DOMAIN_RULE_TABLE
        .iter()
        .filter_map(|(concept_type, source)| match Regex::new(source) {
            Ok(regex) => Some(DomainRule {
                concept_type,
                regex,
            }),
            Err(e) => {
                warn!(concept_type, error = %e, "domain rule failed to compile, skipping");
                None
            }
        })
        .collect()
});

/// The compiled climate pattern catalog, in catalog order.
pub fn pattern_catalog() -> &'static [CompiledPattern] {
    &PATTERNS
}

/// The compiled domain rules.
pub fn domain_rules() -> &'static [DomainRule] {
    &DOMAIN_RULES
}

/// Concept type a pattern key maps to.
pub fn concept_type_for(key: &str) -> &'static str {
    PATTERN_TABLE
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, t, _)| *t)
        .unwrap_or(UNKNOWN_TYPE)
}

/// Every match of every catalog pattern, in catalog order then text order.
pub fn match_patterns(text: &str) -> Vec<Concept> {
    let mut out = Vec::new();
    for pattern in pattern_catalog() {
        for m in pattern.regex.find_iter(text) {
            out.push(
                Concept::new(
                    m.as_str(),
                    pattern.concept_type,
                    m.start(),
                    m.end(),
                    ExtractionSource::Regex,
                )
                .with_pattern_key(pattern.key),
            );
        }
    }
    out
}

/// Catalog patterns with at least one match anywhere in `text`.
pub fn patterns_present(text: &str) -> impl Iterator<Item = &'static CompiledPattern> + '_ {
    pattern_catalog().iter().filter(move |p| p.regex.is_match(text))
}

/// Every match of every domain rule.
pub fn match_domain_rules(text: &str) -> Vec<Concept> {
    let mut out = Vec::new();
    for rule in domain_rules() {
        for m in rule.regex.find_iter(text) {
            out.push(Concept::new(
                m.as_str(),
                rule.concept_type,
                m.start(),
                m.end(),
                ExtractionSource::DomainSpecific,
            ));
        }
    }
    out
}
