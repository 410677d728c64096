//! Fixture accessors: single matches, date ranges, head-to-head and live scores

use chrono::NaiveDate;

use crate::cache::{CacheKey, Category};
use crate::options::{FetchOptions, OptionalInclude};
use crate::upstream::UpstreamError;

use super::{Collection, Endpoint, FootballApi, Record};

const FIXTURE_INCLUDES: &[&str] = &[
    "participants",
    "scores",
    "state",
    "venue",
    "events",
    "lineups",
    "statistics",
];

const FIXTURE_LIST_INCLUDES: &[&str] = &["participants", "scores", "state"];

const LIVE_INCLUDES: &[&str] = &["participants", "scores", "periods", "events", "state"];

impl FootballApi {
    /// One fixture in detail
    ///
    /// Honours `include_odds` and `include_sidelined`; each changes the cache key.
    pub async fn fixture(
        &self,
        fixture_id: u64,
        options: &FetchOptions,
    ) -> Result<Record, UpstreamError> {
        let key = CacheKey::builder(Category::Fixture).id(fixture_id);
        let endpoint = Endpoint::football(format!("fixtures/{fixture_id}"))
            .include(FIXTURE_INCLUDES)
            .optional(&[OptionalInclude::Odds, OptionalInclude::Sidelined]);
        self.fetch_record(key, endpoint, options).await
    }

    /// Fixtures between two dates, optionally narrowed to one team
    pub async fn fixtures_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        team_id: Option<u64>,
        options: &FetchOptions,
    ) -> Result<Collection, UpstreamError> {
        let mut key = CacheKey::builder(Category::FixturesBetween).date(start).date(end);
        let mut path = format!(
            "fixtures/between/{}/{}",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );
        if let Some(team_id) = team_id {
            key = key.id(team_id);
            path.push_str(&format!("/{team_id}"));
        }

        let endpoint = Endpoint::football(path).include(FIXTURE_LIST_INCLUDES);
        self.fetch_all(key, endpoint, options).await
    }

    /// Past meetings between two teams; honours `include_odds`
    pub async fn head_to_head(
        &self,
        team_a: u64,
        team_b: u64,
        options: &FetchOptions,
    ) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::HeadToHead).id(team_a).id(team_b);
        let endpoint = Endpoint::football(format!("fixtures/head-to-head/{team_a}/{team_b}"))
            .include(&["participants", "scores", "state", "venue"])
            .optional(&[OptionalInclude::Odds]);
        self.fetch_all(key, endpoint, options).await
    }

    /// Fixtures currently in play
    pub async fn livescores(&self, options: &FetchOptions) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::Livescores).literal("inplay");
        let endpoint = Endpoint::football("livescores/inplay").include(LIVE_INCLUDES);
        self.fetch_list(key, endpoint, options).await
    }
}
