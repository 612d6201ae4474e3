use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::llm::factcheck::Classification;

/// Stored outcome of a fact-check run. Classification and explanation are
/// written together, never separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactCheckResult {
    pub classification: Classification,
    pub explanation: String,
}

/// Point-in-time copy of the per-article state, shaped for the polling API.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StateSnapshot {
    pub summaries: HashMap<String, String>,
    pub fact_checks: HashMap<String, FactCheckResult>,
    pub summarizing: HashMap<String, bool>,
    pub checking: HashMap<String, bool>,
}

/// Per-session state for all articles: summaries, fact-check results, and
/// the two in-flight flags. Process-local; created empty at startup and
/// discarded on shutdown.
///
/// The mutex is taken only for map access and never held across an await
/// point. Completion handlers of different articles (or of the two
/// operation kinds on one article) interleave freely; re-triggering an
/// in-flight operation is not guarded, so whichever run settles last wins.
#[derive(Debug, Default)]
pub struct SessionState {
    inner: Mutex<StateSnapshot>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a summarization as dispatched for `article_id`.
    pub fn begin_summarize(&self, article_id: &str) {
        let mut maps = self.inner.lock().expect("state lock poisoned");
        maps.summarizing.insert(article_id.to_string(), true);
    }

    /// Settle a summarization. `None` means the attempt failed: the summary
    /// stays unset, only the flag is cleared.
    pub fn finish_summarize(&self, article_id: &str, summary: Option<String>) {
        let mut maps = self.inner.lock().expect("state lock poisoned");
        if let Some(text) = summary {
            maps.summaries.insert(article_id.to_string(), text);
        }
        maps.summarizing.insert(article_id.to_string(), false);
    }

    /// Mark a fact-check as dispatched for `article_id`.
    pub fn begin_fact_check(&self, article_id: &str) {
        let mut maps = self.inner.lock().expect("state lock poisoned");
        maps.checking.insert(article_id.to_string(), true);
    }

    /// Settle a fact-check: store the result and clear the flag. Overwrites
    /// any earlier result for the same article.
    pub fn finish_fact_check(&self, article_id: &str, result: FactCheckResult) {
        let mut maps = self.inner.lock().expect("state lock poisoned");
        maps.fact_checks.insert(article_id.to_string(), result);
        maps.checking.insert(article_id.to_string(), false);
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.inner.lock().expect("state lock poisoned").clone()
    }

    pub fn summary_of(&self, article_id: &str) -> Option<String> {
        let maps = self.inner.lock().expect("state lock poisoned");
        maps.summaries.get(article_id).cloned()
    }

    pub fn fact_check_of(&self, article_id: &str) -> Option<FactCheckResult> {
        let maps = self.inner.lock().expect("state lock poisoned");
        maps.fact_checks.get(article_id).cloned()
    }

    pub fn is_summarizing(&self, article_id: &str) -> bool {
        let maps = self.inner.lock().expect("state lock poisoned");
        maps.summarizing.get(article_id).copied().unwrap_or(false)
    }

    pub fn is_checking(&self, article_id: &str) -> bool {
        let maps = self.inner.lock().expect("state lock poisoned");
        maps.checking.get(article_id).copied().unwrap_or(false)
    }
}
