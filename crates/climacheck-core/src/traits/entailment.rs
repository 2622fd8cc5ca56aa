use crate::errors::ClimacheckResult;
use crate::models::EntailmentLabel;

/// Three-way NLI classifier. The premise is the evidence passage, the
/// hypothesis is the claim being checked.
pub trait IEntailmentClassifier: Send + Sync {
    fn classify(&self, premise: &str, hypothesis: &str) -> ClimacheckResult<EntailmentLabel>;

    fn name(&self) -> &str;
}
