// Summarization client

use super::{LlmProvider, LlmRequest};
use crate::error::Result;

/// Generate a short synopsis of an article's text.
///
/// Sends the fixed instructional preamble plus the article content to the
/// provider and returns the trimmed reply. Output is not deterministic
/// (LLM sampling); token/temperature knobs come from the provider defaults.
/// No retry: a failure is the caller's to handle.
pub async fn summarize_article<P: LlmProvider + ?Sized>(
    provider: &P,
    topic: &str,
    content: &str,
) -> Result<String> {
    let system = format!(
        "You are an assistant that extracts interesting details and key facts \
         from news articles about {} and summarizes the article in a concise \
         manner using the smart brevity framework.",
        topic
    );

    let prompt = format!(
        "Extract the most significant and notable details from the article:\n\n\
         {}\n\n\
         Focus on the most sensitive details: allegations, legal filings, and \
         disputed claims. Highlight sections that suggest or allude to such \
         issues, even if there is no definitive proof.",
        content
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
