//! Per-call fetch options
//!
//! Route handlers translate caller trust and query flags into a `FetchOptions`
//! value. Only the optional includes alter the cache key; `skip_cache` changes
//! how the cache is consulted, never where the result is stored.

use serde::{Deserialize, Serialize};

/// Optional sub-resource expansions an accessor may support
///
/// Variant order is the order suffixes are appended to cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionalInclude {
    /// Bookmaker odds embedded in fixture payloads
    Odds,
    /// Injured and suspended players for both participants
    Sidelined,
}

impl OptionalInclude {
    /// Every optional include, in key-suffix order
    pub const ALL: [OptionalInclude; 2] = [OptionalInclude::Odds, OptionalInclude::Sidelined];

    /// Token appended to a cache key when this include is active
    pub fn key_suffix(self) -> &'static str {
        match self {
            OptionalInclude::Odds => "odds",
            OptionalInclude::Sidelined => "sidelined",
        }
    }

    /// Value added to the upstream `include` parameter
    pub fn upstream_include(self) -> &'static str {
        match self {
            OptionalInclude::Odds => "odds",
            OptionalInclude::Sidelined => "sidelined.sideline",
        }
    }
}

/// Options recognised by every domain accessor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Bypass the cache read and force a live refresh; the result is still cached
    #[serde(default)]
    pub skip_cache: bool,
    /// Embed odds where the accessor supports it (changes the key)
    #[serde(default)]
    pub include_odds: bool,
    /// Embed sidelined players where the accessor supports it (changes the key)
    #[serde(default)]
    pub include_sidelined: bool,
}

impl FetchOptions {
    /// Options that force a refresh and request nothing extra
    pub fn fresh() -> Self {
        Self {
            skip_cache: true,
            ..Self::default()
        }
    }

    pub fn with_odds(mut self) -> Self {
        self.include_odds = true;
        self
    }

    pub fn with_sidelined(mut self) -> Self {
        self.include_sidelined = true;
        self
    }

    /// Whether the caller asked for the given include
    pub fn wants(&self, include: OptionalInclude) -> bool {
        match include {
            OptionalInclude::Odds => self.include_odds,
            OptionalInclude::Sidelined => self.include_sidelined,
        }
    }

    /// Requested includes that the accessor supports, in key-suffix order
    ///
    /// The result does not depend on the order of `supported`.
    pub fn active_includes(&self, supported: &[OptionalInclude]) -> Vec<OptionalInclude> {
        OptionalInclude::ALL
            .into_iter()
            .filter(|include| supported.contains(include) && self.wants(*include))
            .collect()
    }
}
