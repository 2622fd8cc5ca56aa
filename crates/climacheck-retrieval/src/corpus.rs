//! The passage corpus: line-delimited JSON loaded once per run and shared
//! read-only across stages.

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use climacheck_core::errors::ClimacheckResult;
use climacheck_core::models::{Passage, Resource};
use climacheck_observability::tracing_setup::events;
use serde::Serialize;
use tracing::{info, warn};

/// What a corpus load kept and what it skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped_malformed: usize,
    pub blank_lines: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Corpus {
    passages: Vec<Passage>,
}

impl Corpus {
    pub fn from_passages(passages: Vec<Passage>) -> Self {
        Self { passages }
    }

    /// Read a JSONL file. Blank lines are ignored and malformed lines are
    /// skipped with a warning; only I/O failures are errors.
    pub fn load(path: &Path) -> ClimacheckResult<(Self, LoadReport)> {
        let file = File::open(path)?;
        let mut report = LoadReport::default();
        let mut passages = Vec::new();
        let shown = path.display().to_string();

        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                report.blank_lines += 1;
                continue;
            }
            match serde_json::from_str::<Passage>(trimmed) {
                Ok(passage) => passages.push(passage),
                Err(e) => {
                    report.skipped_malformed += 1;
                    events::record_skipped(&shown, i + 1, &e.to_string());
                }
            }
        }
        report.loaded = passages.len();
        info!(
            path = %shown,
            loaded = report.loaded,
            skipped = report.skipped_malformed,
            "corpus loaded"
        );
        Ok((Self { passages }, report))
    }

    /// Load `path` as a shared snapshot. A missing, unreadable, or empty
    /// corpus is reported as unavailable rather than as an error.
    pub fn open(path: &Path) -> Resource<Arc<Corpus>> {
        if !path.exists() {
            warn!(path = %path.display(), "passages file not found");
            return Resource::unavailable(format!("passages file not found: {}", path.display()));
        }
        match Self::load(path) {
            Ok((corpus, _)) if corpus.is_empty() => {
                warn!(path = %path.display(), "no passages loaded");
                Resource::unavailable(format!("no passages in {}", path.display()))
            }
            Ok((corpus, _)) => Resource::Ready(Arc::new(corpus)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "passages file unreadable");
                Resource::unavailable(e.to_string())
            }
        }
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// First passage carrying `id`.
    pub fn get(&self, id: &str) -> Option<&Passage> {
        self.passages.iter().find(|p| p.id == id)
    }

    /// Passages whose ID is in `ids`, in corpus order, one per ID.
    pub fn fetch_by_ids(&self, ids: &BTreeSet<String>) -> Vec<Passage> {
        if ids.is_empty() {
            return Vec::new();
        }
        let mut seen: HashSet<&str> = HashSet::new();
        self.passages
            .iter()
            .filter(|p| ids.contains(&p.id) && seen.insert(p.id.as_str()))
            .cloned()
            .collect()
    }
}
