use serde::{Deserialize, Serialize};

use super::{LlmProvider, LlmRequest};
use crate::error::Result;
use crate::news::Article;

/// Reduction of a raw verdict string into the fixed label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    True,
    False,
    Uncertain,
}

/// Ask the LLM whether `claim` holds, grounded in the given evidence
/// articles. Returns the raw natural-language verdict, not a structured
/// object; classification happens separately in [`classify_verdict`].
///
/// Callers must pass at least one evidence item — the orchestrator fails
/// fast on an empty search result before reaching this function.
pub async fn verify_claim<P: LlmProvider + ?Sized>(
    provider: &P,
    claim: &str,
    evidence: &[Article],
) -> Result<String> {
    let snippets = evidence
        .iter()
        .map(|article| format!("{}: {}", article.title, article.description))
        .collect::<Vec<_>>()
        .join("\n");

    let system = "You are an AI that helps verify the truthfulness of claims \
                  based on the latest information from news articles."
        .to_string();

    let prompt = format!(
        "Here is a claim: \"{}\". Here are some recent articles:\n\n{}\n\n\
         Please determine if the claim is true, false, or uncertain based on \
         the evidence from these articles, and explain why.",
        claim, snippets
    );

    let request = LlmRequest {
        system: Some(system),
        prompt,
        max_tokens: None,
        temperature: None,
        timeout_seconds: None,
    };

    let response = provider.generate(request).await?;
    Ok(response.content.trim().to_string())
}

/// Classify a raw verdict by substring containment, case-sensitive.
/// "true" is checked before "false": if a response pathologically contains
/// both, it classifies as `True`.
pub fn classify_verdict(verdict: &str) -> Classification {
    if verdict.contains("true") {
        Classification::True
    } else if verdict.contains("false") {
        Classification::False
    } else {
        Classification::Uncertain
    }
}
