//! Team, squad and venue accessors

use crate::cache::{CacheKey, Category};
use crate::options::FetchOptions;
use crate::upstream::{encode_segment, UpstreamError};

use super::{Collection, Endpoint, FootballApi, Record};

impl FootballApi {
    /// Team profile with country and home venue
    pub async fn team(
        &self,
        team_id: u64,
        options: &FetchOptions,
    ) -> Result<Record, UpstreamError> {
        let key = CacheKey::builder(Category::Team).id(team_id);
        let endpoint =
            Endpoint::football(format!("teams/{team_id}")).include(&["country", "venue"]);
        self.fetch_record(key, endpoint, options).await
    }

    /// Teams whose name matches `query`, case-insensitively
    pub async fn search_teams(
        &self,
        query: &str,
        options: &FetchOptions,
    ) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::TeamSearch).search(query);
        let path = format!("teams/search/{}", encode_segment(query.trim()));
        let endpoint = Endpoint::football(path).include(&["country"]);
        self.fetch_all(key, endpoint, options).await
    }

    /// Season statistics for a team
    pub async fn team_stats(
        &self,
        team_id: u64,
        season_id: u64,
        options: &FetchOptions,
    ) -> Result<Record, UpstreamError> {
        let key = CacheKey::builder(Category::TeamStats).id(team_id).id(season_id);
        let endpoint = Endpoint::football(format!("teams/{team_id}"))
            .include(&["statistics.details.type"])
            .query("filters", format!("teamStatisticSeasons:{season_id}"));
        self.fetch_record(key, endpoint, options).await
    }

    /// Full fixture schedule of a team's active seasons
    pub async fn team_schedule(
        &self,
        team_id: u64,
        options: &FetchOptions,
    ) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::TeamSchedule).id(team_id);
        let endpoint = Endpoint::football(format!("schedules/teams/{team_id}"));
        self.fetch_list(key, endpoint, options).await
    }

    /// Squad of a team in one season
    pub async fn squad(
        &self,
        team_id: u64,
        season_id: u64,
        options: &FetchOptions,
    ) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::Squad).id(team_id).id(season_id);
        let endpoint = Endpoint::football(format!("squads/seasons/{season_id}/teams/{team_id}"))
            .include(&["player", "position"]);
        self.fetch_list(key, endpoint, options).await
    }

    pub async fn venue(
        &self,
        venue_id: u64,
        options: &FetchOptions,
    ) -> Result<Record, UpstreamError> {
        let key = CacheKey::builder(Category::Venue).id(venue_id);
        let endpoint =
            Endpoint::football(format!("venues/{venue_id}")).include(&["city", "country"]);
        self.fetch_record(key, endpoint, options).await
    }
}
