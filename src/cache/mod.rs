//! Fetch-through cache for upstream API responses
//!
//! This module maps queries to deterministic keys, assigns each data category a
//! freshness tier, and stores payloads in an in-process store with per-entry
//! expiry. [`CacheStore::get_or_fetch`] ties these together: serve from cache on
//! a hit, otherwise call the producer and store its result. Nothing here
//! survives a restart.

mod fetch;
pub mod keys;
mod store;
mod sweeper;
pub mod tier;

pub use keys::{CacheKey, Category, KeyBuilder};
pub use store::{CacheStats, CacheStore};
pub use sweeper::{SweepConfig, SweepHandle};
pub use tier::Tier;
