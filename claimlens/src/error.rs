use thiserror::Error;

/// Failure modes shared by the news search and LLM clients.
///
/// Transport failures (including request timeouts) surface as `Network`;
/// a reachable service answering with a non-2xx status is `Upstream`.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Raised locally when the secondary search returns no candidates.
    #[error("no supporting articles found for claim")]
    NoEvidence,
}

pub type Result<T> = std::result::Result<T, ServiceError>;
