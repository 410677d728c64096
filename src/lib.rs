//! Matchday library
//!
//! A fetch-through cache in front of a football data API: deterministic cache
//! keys, per-category freshness tiers, multi-page aggregation and cache
//! introspection. Route handlers and the `matchday` binary build on
//! [`football::FootballApi`].

pub mod cache;
pub mod cli;
pub mod config;
pub mod football;
pub mod options;
pub mod upstream;

pub use cache::{CacheKey, CacheStats, CacheStore, Category, Tier};
pub use config::UpstreamConfig;
pub use football::{Collection, FootballApi, Record};
pub use options::{FetchOptions, OptionalInclude};
pub use upstream::{ApiFamily, UpstreamClient, UpstreamError};
