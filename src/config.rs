//! Upstream API configuration
//!
//! Defaults point at the public SportMonks v3 hosts. The binary fills these in
//! from command-line flags and their environment variable fallbacks.

use std::time::Duration;

/// Default base URL of the general football API family
pub const DEFAULT_FOOTBALL_BASE_URL: &str = "https://api.sportmonks.com/v3/football";

/// Default base URL of the odds and markets API family
pub const DEFAULT_ODDS_BASE_URL: &str = "https://api.sportmonks.com/v3/odds";

/// Records requested per page when aggregating list endpoints
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Upper bound on pages fetched for one logical request
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Settings for talking to the upstream API
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// API token sent as the `api_token` query parameter
    ///
    /// A missing token is reported on the first request, not at construction.
    pub api_token: Option<String>,
    /// Base URL of the general football family
    pub football_base_url: String,
    /// Base URL of the odds/markets family
    pub odds_base_url: String,
    /// Per-request network timeout in seconds
    pub timeout_secs: u64,
    /// `per_page` value used by the pagination aggregator
    pub page_size: u32,
    /// Pages fetched before aggregation gives up
    pub max_pages: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            football_base_url: DEFAULT_FOOTBALL_BASE_URL.to_string(),
            odds_base_url: DEFAULT_ODDS_BASE_URL.to_string(),
            timeout_secs: 30,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl UpstreamConfig {
    /// Creates a configuration with the given token and default endpoints
    pub fn with_token(api_token: impl Into<String>) -> Self {
        Self {
            api_token: Some(api_token.into()),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The token, if one is set and not blank
    pub fn token(&self) -> Option<&str> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
