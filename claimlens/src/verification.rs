use tracing::warn;

use crate::claims::extract_claim;
use crate::error::{Result, ServiceError};
use crate::llm::factcheck::{classify_verdict, verify_claim, Classification};
use crate::llm::summarizer::summarize_article;
use crate::llm::LlmProvider;
use crate::news::NewsClient;
use crate::state::{FactCheckResult, SessionState};

/// Explanation stored when any step of a fact-check fails. The underlying
/// error goes to the log only; the user-visible state is always one of
/// true/false/uncertain.
pub const FACT_CHECK_ERROR_EXPLANATION: &str = "An error occurred while fact-checking.";

/// Run one fact-check for `article_id` to completion.
///
/// Sets the in-flight flag, derives a short query from the *headline* (not
/// from the claim text — the headline seeds the secondary search), gathers
/// evidence, asks the LLM for a verdict and classifies it. Every failure
/// mode, including an empty evidence set, folds into an `uncertain` result
/// with a fixed explanation. The flag is cleared on every path.
pub async fn run_fact_check(
    state: &SessionState,
    news: &NewsClient,
    provider: &dyn LlmProvider,
    article_id: &str,
    claim: &str,
    headline: &str,
) {
    state.begin_fact_check(article_id);

    let result = match fact_check_claim(news, provider, claim, headline).await {
        Ok(verdict) => FactCheckResult {
            classification: classify_verdict(&verdict),
            explanation: verdict,
        },
        Err(e) => {
            warn!("fact-check failed for article {}: {}", article_id, e);
            FactCheckResult {
                classification: Classification::Uncertain,
                explanation: FACT_CHECK_ERROR_EXPLANATION.to_string(),
            }
        }
    };

    state.finish_fact_check(article_id, result);
}

/// Claim extraction → secondary search → LLM adjudication. Returns the raw
/// verdict string; the caller classifies and stores it.
async fn fact_check_claim(
    news: &NewsClient,
    provider: &dyn LlmProvider,
    claim: &str,
    headline: &str,
) -> Result<String> {
    let query = extract_claim(headline);
    let evidence = news.search(&query).await?;

    if evidence.is_empty() {
        return Err(ServiceError::NoEvidence);
    }

    verify_claim(provider, claim, &evidence).await
}

/// Run one summarization for `article_id` to completion.
///
/// A failure leaves the summary unset and clears the flag; there is no
/// user-visible error state for summarization, only a log line.
pub async fn run_summarize(
    state: &SessionState,
    provider: &dyn LlmProvider,
    topic: &str,
    article_id: &str,
    content: &str,
) {
    state.begin_summarize(article_id);

    match summarize_article(provider, topic, content).await {
        Ok(summary) => state.finish_summarize(article_id, Some(summary)),
        Err(e) => {
            warn!("summarization failed for article {}: {}", article_id, e);
            state.finish_summarize(article_id, None);
        }
    }
}
