//! Fetch-through orchestration on top of [`CacheStore`]
//!
//! Concurrent misses on the same key are not de-duplicated: both callers run
//! their producer and the last write wins.

use std::future::Future;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::keys::CacheKey;
use super::store::CacheStore;

impl CacheStore {
    /// Returns the cached value for `key`, or runs `producer` and caches its result
    ///
    /// # Arguments
    /// * `key` - Canonical key of the logical query
    /// * `ttl` - Lifetime of a freshly produced entry
    /// * `force_refresh` - Skip the read path; the result is still written back
    /// * `producer` - Fetches the live value on a miss or forced refresh
    ///
    /// # Returns
    /// * `Ok(T)` - Cached or freshly produced value
    /// * `Err(E)` - The producer's error, untouched; nothing is cached
    pub async fn get_or_fetch<T, E, F, Fut>(
        &self,
        key: &CacheKey,
        ttl: Duration,
        force_refresh: bool,
        producer: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if force_refresh {
            debug!(key = %key, "forced refresh, skipping cache read");
        } else if let Some(cached) = self.get(key.as_str()) {
            match serde_json::from_value::<T>(cached) {
                Ok(value) => {
                    debug!(key = %key, "cache hit");
                    return Ok(value);
                }
                Err(err) => {
                    self.record_miss_after_hit();
                    warn!(
                        key = %key,
                        error = %err,
                        "cached value has unexpected shape, refetching"
                    );
                }
            }
        } else {
            debug!(key = %key, "cache miss");
        }

        let value = producer().await?;

        match serde_json::to_value(&value) {
            Ok(json) => {
                self.set(key.as_str(), json, ttl);
                debug!(key = %key, ttl_secs = ttl.as_secs(), "cached fresh value");
            }
            Err(err) => {
                warn!(key = %key, error = %err, "fresh value could not be cached");
            }
        }

        Ok(value)
    }
}
