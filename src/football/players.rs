//! Player accessors

use crate::cache::{CacheKey, Category};
use crate::options::FetchOptions;
use crate::upstream::{encode_segment, UpstreamError};

use super::{Collection, Endpoint, FootballApi, Record};

impl FootballApi {
    pub async fn player(
        &self,
        player_id: u64,
        options: &FetchOptions,
    ) -> Result<Record, UpstreamError> {
        let key = CacheKey::builder(Category::Player).id(player_id);
        let endpoint = Endpoint::football(format!("players/{player_id}"))
            .include(&["position", "nationality", "teams"]);
        self.fetch_record(key, endpoint, options).await
    }

    /// Players whose name matches `query`, case-insensitively
    pub async fn search_players(
        &self,
        query: &str,
        options: &FetchOptions,
    ) -> Result<Collection, UpstreamError> {
        let key = CacheKey::builder(Category::PlayerSearch).search(query);
        let path = format!("players/search/{}", encode_segment(query.trim()));
        let endpoint = Endpoint::football(path).include(&["position", "nationality"]);
        self.fetch_all(key, endpoint, options).await
    }
}
