use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, ServiceError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One article as returned by the search service. Immutable once fetched;
/// `published` is passed through as upstream's timestamp text and formatted
/// by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub published: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    news: Vec<Article>,
}

/// Client for the external news search service.
///
/// Used for both the main topic listing and claim-verification lookups.
/// The API key is sent as-is; a missing key is rejected upstream, not here.
pub struct NewsClient {
    api_url: String,
    api_key: String,
    language: String,
    client: reqwest::Client,
}

impl NewsClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            language: language.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Search for articles matching `keywords`.
    ///
    /// An empty result list is a valid, non-error outcome. No pagination,
    /// no deduplication; ordering is whatever upstream returns.
    pub async fn search(&self, keywords: &str) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("keywords", keywords),
                ("language", &self.language),
                ("apiKey", &self.api_key),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Upstream { status, body });
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| ServiceError::MalformedResponse(format!("news payload: {}", e)))?;

        Ok(parsed.news)
    }
}
