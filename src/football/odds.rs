//! Predictions, odds and betting reference data

use crate::cache::{CacheKey, Category};
use crate::options::FetchOptions;
use crate::upstream::UpstreamError;

use super::{Collection, Endpoint, FootballApi};

impl FootballApi {
    /// Outcome probabilities for a fixture
    pub async fn predictions(
        &self,
        fixture_id: u64,
        options: &FetchOptions,
    ) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::Predictions).id(fixture_id);
        let endpoint =
            Endpoint::football(format!("predictions/probabilities/fixtures/{fixture_id}"))
                .include(&["type"]);
        self.fetch_all(key, endpoint, options).await
    }

    /// Pre-match odds across bookmakers and markets
    pub async fn pre_match_odds(
        &self,
        fixture_id: u64,
        options: &FetchOptions,
    ) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::PreMatchOdds).id(fixture_id);
        let endpoint = Endpoint::football(format!("odds/pre-match/fixtures/{fixture_id}"))
            .include(&["market", "bookmaker"]);
        self.fetch_all(key, endpoint, options).await
    }

    /// Odds while the fixture is being played
    pub async fn inplay_odds(
        &self,
        fixture_id: u64,
        options: &FetchOptions,
    ) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::InplayOdds).id(fixture_id);
        let endpoint = Endpoint::football(format!("odds/inplay/fixtures/{fixture_id}"))
            .include(&["market", "bookmaker"]);
        self.fetch_all(key, endpoint, options).await
    }

    pub async fn markets(&self, options: &FetchOptions) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::Markets).literal("all");
        self.fetch_all(key, Endpoint::odds("markets"), options).await
    }

    pub async fn bookmakers(&self, options: &FetchOptions) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::Bookmakers).literal("all");
        self.fetch_all(key, Endpoint::odds("bookmakers"), options).await
    }
}
