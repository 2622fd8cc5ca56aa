use std::fmt;

use serde::Serialize;

use super::Passage;

/// The five stages of the fusion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStage {
    Pattern,
    Entity,
    Semantic,
    Hybrid,
    Final,
}

impl RetrievalStage {
    pub const ALL: [RetrievalStage; 5] = [
        RetrievalStage::Pattern,
        RetrievalStage::Entity,
        RetrievalStage::Semantic,
        RetrievalStage::Hybrid,
        RetrievalStage::Final,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Entity => "entity",
            Self::Semantic => "semantic",
            Self::Hybrid => "hybrid",
            Self::Final => "final",
        }
    }
}

impl fmt::Display for RetrievalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-run pipeline state. Each field is indexed by query position and stays
/// `None` until its producing stage has completed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RetrievalState {
    pub queries: Vec<String>,
    pub regex_matched: Option<Vec<Vec<Passage>>>,
    pub entity_matched: Option<Vec<Vec<Passage>>>,
    pub semantic_matched: Option<Vec<Vec<Passage>>>,
    pub hybrid_combined: Option<Vec<Vec<Passage>>>,
    pub final_results: Option<Vec<Vec<Passage>>>,
}

impl RetrievalState {
    pub fn new(queries: Vec<String>) -> Self {
        Self {
            queries,
            ..Self::default()
        }
    }

    pub fn stage(&self, stage: RetrievalStage) -> Option<&[Vec<Passage>]> {
        let field = match stage {
            RetrievalStage::Pattern => &self.regex_matched,
            RetrievalStage::Entity => &self.entity_matched,
            RetrievalStage::Semantic => &self.semantic_matched,
            RetrievalStage::Hybrid => &self.hybrid_combined,
            RetrievalStage::Final => &self.final_results,
        };
        field.as_deref()
    }

    pub fn set_stage(&mut self, stage: RetrievalStage, results: Vec<Vec<Passage>>) {
        let field = match stage {
            RetrievalStage::Pattern => &mut self.regex_matched,
            RetrievalStage::Entity => &mut self.entity_matched,
            RetrievalStage::Semantic => &mut self.semantic_matched,
            RetrievalStage::Hybrid => &mut self.hybrid_combined,
            RetrievalStage::Final => &mut self.final_results,
        };
        *field = Some(results);
    }

    pub fn is_complete(&self) -> bool {
        RetrievalStage::ALL.iter().all(|s| self.stage(*s).is_some())
    }
}
