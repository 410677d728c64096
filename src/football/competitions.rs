//! League, season and table accessors

use crate::cache::{CacheKey, Category};
use crate::options::FetchOptions;
use crate::upstream::UpstreamError;

use super::{Collection, Endpoint, FootballApi, Record};

impl FootballApi {
    /// Every league available to the subscription
    pub async fn leagues(&self, options: &FetchOptions) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::Leagues).literal("all");
        let endpoint = Endpoint::football("leagues").include(&["country", "currentSeason"]);
        self.fetch_all(key, endpoint, options).await
    }

    pub async fn league(
        &self,
        league_id: u64,
        options: &FetchOptions,
    ) -> Result<Record, UpstreamError> {
        let key = CacheKey::builder(Category::League).id(league_id);
        let endpoint = Endpoint::football(format!("leagues/{league_id}"))
            .include(&["country", "currentSeason", "seasons"]);
        self.fetch_record(key, endpoint, options).await
    }

    pub async fn season(
        &self,
        season_id: u64,
        options: &FetchOptions,
    ) -> Result<Record, UpstreamError> {
        let key = CacheKey::builder(Category::Season).id(season_id);
        let endpoint =
            Endpoint::football(format!("seasons/{season_id}")).include(&["league", "stages"]);
        self.fetch_record(key, endpoint, options).await
    }

    /// League table for a season
    pub async fn standings(
        &self,
        season_id: u64,
        options: &FetchOptions,
    ) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::Standings).id(season_id);
        let endpoint = Endpoint::football(format!("standings/seasons/{season_id}"))
            .include(&["participant", "details.type", "form"]);
        self.fetch_list(key, endpoint, options).await
    }

    /// Table updated with matches in play
    pub async fn live_standings(
        &self,
        league_id: u64,
        options: &FetchOptions,
    ) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::LiveStandings).id(league_id);
        let endpoint = Endpoint::football(format!("standings/live/leagues/{league_id}"))
            .include(&["participant", "details.type"]);
        self.fetch_list(key, endpoint, options).await
    }

    pub async fn top_scorers(
        &self,
        season_id: u64,
        options: &FetchOptions,
    ) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::TopScorers).id(season_id);
        let endpoint = Endpoint::football(format!("topscorers/seasons/{season_id}"))
            .include(&["player", "participant", "type"]);
        self.fetch_all(key, endpoint, options).await
    }
}
