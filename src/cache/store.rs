//! In-process cache store
//!
//! Holds upstream payloads as JSON values with a per-entry expiry and tracks
//! hit/miss counters for operational introspection.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;

use super::keys::category_of;

/// Lifetime used when a requested TTL would overflow `Instant`
const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 86_400);

/// A cached payload and the instant it stops being readable
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Snapshot of cache effectiveness and contents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Hits as a percentage of lookups, rounded to two decimals
    pub hit_rate: f64,
    pub total_keys: usize,
    /// Live keys grouped by the text before the first `:`
    pub keys_by_category: BTreeMap<String, usize>,
}

/// Shared key/value store with per-entry TTL
///
/// Create one per process and hand it to consumers behind an `Arc`. Tests
/// build independent stores.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value if present and unexpired, counting a hit or a miss
    ///
    /// Expired entries are evicted on the way out.
    pub fn get(&self, key: &str) -> Option<Value> {
        debug_assert!(!key.is_empty(), "cache keys must not be empty");
        let now = Instant::now();

        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            }
        }

        // Expired: re-check under the write lock, a concurrent set may have refreshed it
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(key) {
            if !entry.is_expired(now) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.value.clone());
            }
            entries.remove(key);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Inserts or replaces the entry, expiring `ttl` from now
    pub fn set(&self, key: &str, value: Value, ttl: Duration) {
        debug_assert!(!key.is_empty(), "cache keys must not be empty");
        let now = Instant::now();
        let entry = CacheEntry {
            value,
            expires_at: now.checked_add(ttl).unwrap_or(now + MAX_TTL),
        };
        self.entries.write().insert(key.to_string(), entry);
    }

    /// Reclassifies a lookup already counted as a hit into a miss
    ///
    /// Used when a cached value turned out to be unusable and was refetched.
    pub(crate) fn record_miss_after_hit(&self) {
        let _ = self
            .hits
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |hits| hits.checked_sub(1));
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Removes the entry, returning how many were deleted (0 or 1)
    pub fn delete(&self, key: &str) -> usize {
        usize::from(self.entries.write().remove(key).is_some())
    }

    /// Removes every entry and resets the hit/miss counters
    pub fn flush_all(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Removes every entry whose key starts with `prefix`
    ///
    /// This is a raw string match: `team` also removes `teamStats:1`. Pass
    /// `team:` to target a single family. Counters are left alone.
    pub fn flush_by_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }

    /// Sorted snapshot of keys that are still readable
    pub fn list_keys(&self) -> Vec<String> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .entries
            .read()
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Whole seconds until expiry, rounded up; `-1` when absent or expired
    pub fn remaining_ttl(&self, key: &str) -> i64 {
        let now = Instant::now();
        match self.entries.read().get(key) {
            Some(entry) if !entry.is_expired(now) => {
                let remaining = entry.expires_at - now;
                let millis = remaining.as_millis();
                i64::try_from(millis.div_ceil(1000)).unwrap_or(i64::MAX)
            }
            _ => -1,
        }
    }

    /// Physically evicts expired entries, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.list_keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn detailed_stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let keys = self.list_keys();

        let mut keys_by_category = BTreeMap::new();
        for key in &keys {
            *keys_by_category
                .entry(category_of(key).to_string())
                .or_insert(0) += 1;
        }

        CacheStats {
            hits,
            misses,
            hit_rate: hit_rate_percent(hits, misses),
            total_keys: keys.len(),
            keys_by_category,
        }
    }
}

fn hit_rate_percent(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        return 0.0;
    }
    let rate = hits as f64 / total as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_get_after_set_returns_value() {
        let store = CacheStore::new();
        store.set("team:62", json!({"id": 62}), HOUR);

        assert_eq!(store.get("team:62"), Some(json!({"id": 62})));
    }

    #[test]
    fn test_get_missing_key_is_absent() {
        let store = CacheStore::new();
        assert_eq!(store.get("team:1"), None);
    }

    #[test]
    fn test_set_replaces_whole_entry() {
        let store = CacheStore::new();
        store.set("team:1", json!({"name": "first", "extra": true}), HOUR);
        store.set("team:1", json!({"name": "second"}), HOUR);

        assert_eq!(store.get("team:1"), Some(json!({"name": "second"})));
    }

    #[test]
    fn test_expired_entry_is_never_returned() {
        let store = CacheStore::new();
        store.set("livescores:inplay", json!([1, 2]), Duration::from_millis(50));
        assert!(store.get("livescores:inplay").is_some());

        thread::sleep(Duration::from_millis(120));

        assert_eq!(store.get("livescores:inplay"), None);
        assert_eq!(store.remaining_ttl("livescores:inplay"), -1);
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let store = CacheStore::new();
        store.set("team:1", json!(1), Duration::ZERO);
        assert_eq!(store.get("team:1"), None);
    }

    #[test]
    fn test_oversized_ttl_is_clamped() {
        let store = CacheStore::new();
        store.set("team:1", json!(1), Duration::from_secs(u64::MAX));

        assert_eq!(store.get("team:1"), Some(json!(1)));
        assert!(store.remaining_ttl("team:1") > 365 * 86_400);
    }

    #[test]
    fn test_hits_and_misses_are_counted() {
        let store = CacheStore::new();
        store.set("team:1", json!(1), HOUR);

        store.get("team:1");
        store.get("team:1");
        store.get("team:2");

        let stats = store.detailed_stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate, 66.67);
    }

    #[test]
    fn test_expired_read_counts_as_miss() {
        let store = CacheStore::new();
        store.set("team:1", json!(1), Duration::ZERO);
        store.get("team:1");

        let stats = store.detailed_stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_hit_rate_is_zero_without_lookups() {
        let store = CacheStore::new();
        assert_eq!(store.detailed_stats().hit_rate, 0.0);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = CacheStore::new();
        store.set("team:1", json!(1), HOUR);

        assert_eq!(store.delete("team:1"), 1);
        assert_eq!(store.delete("team:1"), 0);
        assert_eq!(store.get("team:1"), None);
    }

    #[test]
    fn test_flush_all_clears_entries_and_counters() {
        let store = CacheStore::new();
        store.set("team:1", json!(1), HOUR);
        store.get("team:1");
        store.get("team:2");

        store.flush_all();

        let stats = store.detailed_stats();
        assert_eq!(stats.total_keys, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_flush_by_prefix_with_delimiter_targets_one_family() {
        let store = CacheStore::new();
        store.set("team:1", json!(1), HOUR);
        store.set("team:2", json!(2), HOUR);
        store.set("teamStats:1", json!(3), HOUR);

        assert_eq!(store.flush_by_prefix("team:"), 2);
        assert_eq!(store.list_keys(), vec!["teamStats:1".to_string()]);
    }

    #[test]
    fn test_flush_by_prefix_without_delimiter_matches_broadly() {
        let store = CacheStore::new();
        store.set("team:1", json!(1), HOUR);
        store.set("teamStats:1", json!(2), HOUR);
        store.set("teamSearch:fulham", json!(3), HOUR);
        store.set("fixture:1", json!(4), HOUR);

        assert_eq!(store.flush_by_prefix("team"), 3);
        assert_eq!(store.list_keys(), vec!["fixture:1".to_string()]);
    }

    #[test]
    fn test_flush_by_prefix_keeps_counters() {
        let store = CacheStore::new();
        store.set("team:1", json!(1), HOUR);
        store.get("team:1");

        store.flush_by_prefix("team:");

        assert_eq!(store.detailed_stats().hits, 1);
    }

    #[test]
    fn test_list_keys_skips_expired_entries() {
        let store = CacheStore::new();
        store.set("team:1", json!(1), HOUR);
        store.set("livescores:inplay", json!([]), Duration::ZERO);

        assert_eq!(store.list_keys(), vec!["team:1".to_string()]);
    }

    #[test]
    fn test_remaining_ttl_rounds_up_whole_seconds() {
        let store = CacheStore::new();
        store.set("team:1", json!(1), Duration::from_secs(60));

        let ttl = store.remaining_ttl("team:1");
        assert!((59..=60).contains(&ttl), "unexpected ttl {ttl}");
        assert_eq!(store.remaining_ttl("team:404"), -1);
    }

    #[test]
    fn test_purge_expired_evicts_only_expired() {
        let store = CacheStore::new();
        store.set("team:1", json!(1), HOUR);
        store.set("livescores:inplay", json!([]), Duration::ZERO);

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.purge_expired(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_stats_group_keys_by_category() {
        let store = CacheStore::new();
        store.set("team:1", json!(1), HOUR);
        store.set("team:2", json!(2), HOUR);
        store.set("h2h:1:2:odds", json!(3), HOUR);

        let stats = store.detailed_stats();
        assert_eq!(stats.total_keys, 3);
        assert_eq!(stats.keys_by_category.get("team"), Some(&2));
        assert_eq!(stats.keys_by_category.get("h2h"), Some(&1));
    }

    #[test]
    fn test_stats_serialize_to_json() {
        let store = CacheStore::new();
        store.set("team:1", json!(1), HOUR);

        let json = serde_json::to_value(store.detailed_stats()).unwrap();
        assert_eq!(json["total_keys"], 1);
        assert_eq!(json["keys_by_category"]["team"], 1);
    }
}
