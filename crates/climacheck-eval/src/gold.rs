//! Gold set loading and alignment with retrieval output.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use climacheck_core::errors::{ClimacheckResult, DataError, ValidationError};
use climacheck_core::models::{EvaluationPair, GoldEntry, Passage};
use climacheck_observability::tracing_setup::events;
use serde::Serialize;
use tracing::{debug, info, warn};

/// What a gold set load kept and what it skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GoldLoadReport {
    pub loaded: usize,
    pub skipped_malformed: usize,
    pub blank_lines: usize,
}

/// Read a gold set.
///
/// A `.json` file must hold a single array of entries and fails as a whole
/// if it does not parse. Any other file is read as JSONL, where blank lines
/// are ignored and malformed lines are skipped with a warning.
pub fn load_gold_set(path: &Path) -> ClimacheckResult<(Vec<GoldEntry>, GoldLoadReport)> {
    if path.extension().is_some_and(|ext| ext == "json") {
        return load_array(path);
    }

    let file = File::open(path)?;
    let shown = path.display().to_string();
    let mut report = GoldLoadReport::default();
    let mut entries = Vec::new();

    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            report.blank_lines += 1;
            continue;
        }
        match serde_json::from_str::<GoldEntry>(trimmed) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                report.skipped_malformed += 1;
                events::record_skipped(&shown, i + 1, &e.to_string());
            }
        }
    }
    report.loaded = entries.len();
    info!(
        path = %shown,
        loaded = report.loaded,
        skipped = report.skipped_malformed,
        "gold set loaded"
    );
    Ok((entries, report))
}

fn load_array(path: &Path) -> ClimacheckResult<(Vec<GoldEntry>, GoldLoadReport)> {
    let content = std::fs::read_to_string(path)?;
    let entries: Vec<GoldEntry> =
        serde_json::from_str(&content).map_err(|e| DataError::MalformedDocument {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    let report = GoldLoadReport {
        loaded: entries.len(),
        ..GoldLoadReport::default()
    };
    info!(path = %path.display(), loaded = report.loaded, "gold set loaded");
    Ok((entries, report))
}

/// Pair each gold entry with the passages retrieved for its claim.
///
/// Entries with evidence score against that passage; entries with neither
/// evidence nor a label are control cases. An entry with a label but no
/// evidence cannot be scored and is left out with a warning.
///
/// # Errors
/// `ValidationError::LengthMismatch` when the two inputs differ in length,
/// `ValidationError::UnrecognizedLabel` when an entry carries a label outside
/// the known vocabularies.
pub fn create_evaluation_pairs(
    gold: &[GoldEntry],
    retrieved: &[Vec<Passage>],
) -> ClimacheckResult<Vec<EvaluationPair>> {
    if gold.len() != retrieved.len() {
        return Err(ValidationError::LengthMismatch {
            left_name: "gold entries".to_string(),
            left: gold.len(),
            right_name: "retrieved results".to_string(),
            right: retrieved.len(),
        }
        .into());
    }

    let mut pairs = Vec::with_capacity(gold.len());
    for (entry, passages) in gold.iter().zip(retrieved) {
        entry.entailment_label()?;
        match entry.relevant_target() {
            Some(target) => {
                if target.is_control() {
                    debug!(entry = %entry.id, "including control case");
                }
                pairs.push(EvaluationPair::new(passages.clone(), target));
            }
            None => warn!(entry = %entry.id, "no evidence id for labeled entry, excluded"),
        }
    }
    Ok(pairs)
}
