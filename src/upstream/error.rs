use thiserror::Error;

/// Errors that can occur when fetching from the upstream API
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status
    #[error("upstream returned {status}: {message}")]
    Http { status: u16, message: String },

    /// Network-level failure (DNS, connection reset, timeout)
    #[error("upstream request failed: {0}")]
    Transport(String),

    /// Required configuration such as the API token is missing
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A page failed during multi-page aggregation; no partial result is kept
    #[error("failed to fetch page {page}: {source}")]
    Pagination {
        page: u32,
        #[source]
        source: Box<UpstreamError>,
    },

    /// Response body was not valid JSON
    #[error("failed to parse upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response JSON did not have the expected shape
    #[error("unexpected upstream response shape: {0}")]
    UnexpectedShape(String),

    /// Upstream kept reporting more pages past the configured limit
    #[error("pagination exceeded {0} pages")]
    PageLimit(u32),
}

impl UpstreamError {
    /// HTTP status of the failure, looking through pagination wrappers
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Http { status, .. } => Some(*status),
            UpstreamError::Pagination { source, .. } => source.status(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err.to_string())
    }
}
