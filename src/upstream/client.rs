//! Upstream API client
//!
//! Builds request URLs for the two API families, attaches the token and the
//! `include` expansions, and turns non-2xx responses into errors. There are no
//! automatic retries: one failed call is one reported failure.

use std::sync::Arc;

use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::error::UpstreamError;
use super::transport::{ReqwestTransport, Transport};
use crate::config::UpstreamConfig;

/// Query parameter carrying the API token
const TOKEN_PARAM: &str = "api_token";

/// Query parameter carrying semicolon-joined expansions
const INCLUDE_PARAM: &str = "include";

/// Which upstream API family a path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFamily {
    /// General football data (teams, fixtures, standings, ...)
    Football,
    /// Odds reference data (markets, bookmakers)
    Odds,
}

/// Pagination block of a list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub has_more: bool,
}

/// One upstream response: the `data` payload plus optional pagination
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl Page {
    /// Whether the upstream reports more pages after this one
    pub fn has_more(&self) -> bool {
        self.pagination.as_ref().is_some_and(|p| p.has_more)
    }
}

/// Error body returned by the upstream on failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the upstream football data API
#[derive(Clone)]
pub struct UpstreamClient {
    transport: Arc<dyn Transport>,
    config: UpstreamConfig,
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("football_base_url", &self.config.football_base_url)
            .field("odds_base_url", &self.config.odds_base_url)
            .field("has_token", &self.config.token().is_some())
            .finish()
    }
}

impl UpstreamClient {
    /// Create a client that talks HTTP through reqwest
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client with a custom transport
    pub fn with_transport(config: UpstreamConfig, transport: Arc<dyn Transport>) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Fetches a single upstream response
    ///
    /// # Arguments
    /// * `path` - Path below the family's base URL, e.g. `teams/62`
    /// * `includes` - Expansions joined into the `include` parameter when non-empty
    /// * `family` - API family selecting the base URL
    /// * `query` - Extra query parameters such as `page` or `filters`
    ///
    /// # Returns
    /// * `Ok(Page)` - Decoded response envelope
    /// * `Err(UpstreamError)` - Missing token, network failure, non-2xx status or bad JSON
    pub async fn request(
        &self,
        path: &str,
        includes: &[&str],
        family: ApiFamily,
        query: &[(&str, String)],
    ) -> Result<Page, UpstreamError> {
        let url = self.build_url(path, includes, family, query)?;
        debug!(url = %redacted(&url), "upstream request");

        let response = self.transport.get(url).await?;

        if !response.is_success() {
            return Err(UpstreamError::Http {
                status: response.status,
                message: error_message(response.status, &response.body),
            });
        }

        let page: Page = serde_json::from_str(&response.body)?;
        Ok(page)
    }

    /// Builds the full request URL including token, includes and query
    fn build_url(
        &self,
        path: &str,
        includes: &[&str],
        family: ApiFamily,
        query: &[(&str, String)],
    ) -> Result<Url, UpstreamError> {
        let token = self.config.token().ok_or_else(|| {
            UpstreamError::Configuration(
                "API token is not set (use --api-token or SPORTMONKS_API_TOKEN)".to_string(),
            )
        })?;

        let base = match family {
            ApiFamily::Football => &self.config.football_base_url,
            ApiFamily::Odds => &self.config.odds_base_url,
        };
        let raw = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| UpstreamError::Configuration(format!("invalid upstream URL {raw}: {e}")))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(TOKEN_PARAM, token);
            if !includes.is_empty() {
                pairs.append_pair(INCLUDE_PARAM, &includes.join(";"));
            }
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }
}

/// Message for a failed response: the upstream's own text when it has one
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("upstream request failed with status {status}"))
}

/// URL text with the API token masked, for logging
fn redacted(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            if name == TOKEN_PARAM {
                (name.into_owned(), "***".to_string())
            } else {
                (name.into_owned(), value.into_owned())
            }
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

/// Percent-encodes user text for use as a single path segment
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
