//! Domain accessors for the football data API
//!
//! Each accessor picks a cache key, a tier and a producer, then delegates to
//! [`CacheStore::get_or_fetch`]. None of them implements caching itself. They
//! differ only in path, default includes, single or multi-page fetching, and
//! tier.

mod competitions;
mod fixtures;
mod odds;
mod players;
mod teams;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::{CacheStore, KeyBuilder};
use crate::options::{FetchOptions, OptionalInclude};
use crate::upstream::{ApiFamily, UpstreamClient, UpstreamError};

/// Response of a detail endpoint: one upstream object, passed through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: Value,
}

/// Response of a list endpoint: every record across all fetched pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub data: Vec<Value>,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Where and how an accessor fetches from upstream
#[derive(Debug, Clone)]
struct Endpoint {
    path: String,
    family: ApiFamily,
    includes: &'static [&'static str],
    optional: &'static [OptionalInclude],
    query: Vec<(&'static str, String)>,
}

impl Endpoint {
    fn football(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            family: ApiFamily::Football,
            includes: &[],
            optional: &[],
            query: Vec::new(),
        }
    }

    fn odds(path: impl Into<String>) -> Self {
        Self {
            family: ApiFamily::Odds,
            ..Self::football(path)
        }
    }

    fn include(mut self, includes: &'static [&'static str]) -> Self {
        self.includes = includes;
        self
    }

    /// Optional includes this endpoint honours; others are ignored
    fn optional(mut self, optional: &'static [OptionalInclude]) -> Self {
        self.optional = optional;
        self
    }

    fn query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    /// Default includes followed by the requested optional ones
    fn includes_for(&self, options: &FetchOptions) -> Vec<&'static str> {
        let mut includes = self.includes.to_vec();
        includes.extend(
            options
                .active_includes(self.optional)
                .into_iter()
                .map(OptionalInclude::upstream_include),
        );
        includes
    }
}

/// Cached access to every upstream entity
///
/// Cloning is cheap; clones share the same cache store.
#[derive(Debug, Clone)]
pub struct FootballApi {
    client: UpstreamClient,
    cache: Arc<CacheStore>,
}

impl FootballApi {
    /// Creates the accessor layer over an injected client and store
    pub fn new(client: UpstreamClient, cache: Arc<CacheStore>) -> Self {
        Self { client, cache }
    }

    /// The shared cache, for stats, key listing and invalidation
    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    /// Detail endpoint fetched with a single request
    async fn fetch_record(
        &self,
        key: KeyBuilder,
        endpoint: Endpoint,
        options: &FetchOptions,
    ) -> Result<Record, UpstreamError> {
        let ttl = key.category().ttl();
        let key = key.includes(options, endpoint.optional).build();
        let includes = endpoint.includes_for(options);

        self.cache
            .get_or_fetch(&key, ttl, options.skip_cache, || async {
                let page = self
                    .client
                    .request(&endpoint.path, &includes, endpoint.family, &endpoint.query)
                    .await?;
                Ok::<_, UpstreamError>(Record { data: page.data })
            })
            .await
    }

    /// List endpoint the upstream answers in one response
    async fn fetch_list(
        &self,
        key: KeyBuilder,
        endpoint: Endpoint,
        options: &FetchOptions,
    ) -> Result<Collection, UpstreamError> {
        let ttl = key.category().ttl();
        let key = key.includes(options, endpoint.optional).build();
        let includes = endpoint.includes_for(options);

        self.cache
            .get_or_fetch(&key, ttl, options.skip_cache, || async {
                let page = self
                    .client
                    .request(&endpoint.path, &includes, endpoint.family, &endpoint.query)
                    .await?;
                let data = match page.data {
                    Value::Array(records) => records,
                    Value::Null => Vec::new(),
                    _ => {
                        return Err(UpstreamError::UnexpectedShape(format!(
                            "expected a list from {}",
                            endpoint.path
                        )))
                    }
                };
                Ok(Collection { data })
            })
            .await
    }

    /// List endpoint aggregated across every page
    async fn fetch_all(
        &self,
        key: KeyBuilder,
        endpoint: Endpoint,
        options: &FetchOptions,
    ) -> Result<Collection, UpstreamError> {
        let ttl = key.category().ttl();
        let key = key.includes(options, endpoint.optional).build();
        let includes = endpoint.includes_for(options);

        self.cache
            .get_or_fetch(&key, ttl, options.skip_cache, || async {
                let data = self
                    .client
                    .request_all_pages(&endpoint.path, &includes, endpoint.family, &endpoint.query)
                    .await?;
                Ok::<_, UpstreamError>(Collection { data })
            })
            .await
    }
}
