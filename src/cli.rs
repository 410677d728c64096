//! Command-line interface parsing for the matchday operator tool
//!
//! Each subcommand maps to one domain accessor. Global flags carry the fetch
//! options and the upstream configuration, with environment variable fallbacks.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;

use crate::config::{UpstreamConfig, DEFAULT_FOOTBALL_BASE_URL, DEFAULT_ODDS_BASE_URL};
use crate::football::FootballApi;
use crate::options::FetchOptions;
use crate::upstream::UpstreamError;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// A date argument is not `YYYY-MM-DD`
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The end of a date range precedes its start
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

/// Matchday - query a football data API through a fetch-through cache
#[derive(Parser, Debug)]
#[command(name = "matchday")]
#[command(about = "Football data API queries through a tiered fetch-through cache")]
#[command(version)]
pub struct Cli {
    /// API token for the upstream football data API
    #[arg(long, env = "SPORTMONKS_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Base URL of the general football API
    #[arg(long, env = "MATCHDAY_FOOTBALL_URL", default_value = DEFAULT_FOOTBALL_BASE_URL)]
    pub football_url: String,

    /// Base URL of the odds and markets API
    #[arg(long, env = "MATCHDAY_ODDS_URL", default_value = DEFAULT_ODDS_BASE_URL)]
    pub odds_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "MATCHDAY_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Bypass cached data and force a live refresh
    #[arg(long, global = true)]
    pub fresh: bool,

    /// Embed odds where the query supports it
    #[arg(long, global = true)]
    pub odds: bool,

    /// Embed sidelined players where the query supports it
    #[arg(long, global = true)]
    pub sidelined: bool,

    /// Run the query this many times against the same cache
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Print cache statistics and keys to stderr when done
    #[arg(long)]
    pub stats: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Queries the tool can run
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Team profile
    Team { id: u64 },
    /// Search teams by name
    SearchTeams { query: String },
    /// Team statistics for a season
    TeamStats { team: u64, season: u64 },
    /// Team schedule
    Schedule { team: u64 },
    /// Team squad for a season
    Squad { team: u64, season: u64 },
    /// Player profile
    Player { id: u64 },
    /// Search players by name
    SearchPlayers { query: String },
    /// Venue details
    Venue { id: u64 },
    /// Single fixture (honours --odds and --sidelined)
    Fixture { id: u64 },
    /// Fixtures between two dates
    Fixtures {
        #[arg(value_parser = parse_date)]
        start: NaiveDate,
        #[arg(value_parser = parse_date)]
        end: NaiveDate,
        /// Only fixtures of this team
        #[arg(long)]
        team: Option<u64>,
    },
    /// Head-to-head history (honours --odds)
    H2h { team_a: u64, team_b: u64 },
    /// Fixtures in play
    Livescores,
    /// All leagues
    Leagues,
    /// League details
    League { id: u64 },
    /// Season details
    Season { id: u64 },
    /// Season standings
    Standings { season: u64 },
    /// Live standings for a league
    LiveStandings { league: u64 },
    /// Season top scorers
    TopScorers { season: u64 },
    /// Fixture predictions
    Predictions { fixture: u64 },
    /// Pre-match odds for a fixture
    Odds { fixture: u64 },
    /// In-play odds for a fixture
    InplayOdds { fixture: u64 },
    /// Betting markets
    Markets,
    /// Bookmakers
    Bookmakers,
}

/// Parses a `YYYY-MM-DD` argument
///
/// # Returns
/// * `Ok(NaiveDate)` if the string is a valid calendar date
/// * `Err(CliError::InvalidDate)` otherwise
pub fn parse_date(s: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}

impl Cli {
    /// Checks constraints clap cannot express
    pub fn validate(&self) -> Result<(), CliError> {
        if let Command::Fixtures { start, end, .. } = &self.command {
            if start > end {
                return Err(CliError::InvalidDateRange {
                    start: *start,
                    end: *end,
                });
            }
        }
        Ok(())
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            skip_cache: self.fresh,
            include_odds: self.odds,
            include_sidelined: self.sidelined,
        }
    }

    pub fn upstream_config(&self) -> UpstreamConfig {
        UpstreamConfig {
            api_token: self.api_token.clone(),
            football_base_url: self.football_url.clone(),
            odds_base_url: self.odds_url.clone(),
            timeout_secs: self.timeout_secs,
            ..UpstreamConfig::default()
        }
    }
}

/// Runs one command through the accessor layer, returning the JSON payload
pub async fn execute(
    api: &FootballApi,
    command: &Command,
    options: &FetchOptions,
) -> Result<Value, UpstreamError> {
    let value = match command {
        Command::Team { id } => serde_json::to_value(api.team(*id, options).await?)?,
        Command::SearchTeams { query } => {
            serde_json::to_value(api.search_teams(query, options).await?)?
        }
        Command::TeamStats { team, season } => {
            serde_json::to_value(api.team_stats(*team, *season, options).await?)?
        }
        Command::Schedule { team } => {
            serde_json::to_value(api.team_schedule(*team, options).await?)?
        }
        Command::Squad { team, season } => {
            serde_json::to_value(api.squad(*team, *season, options).await?)?
        }
        Command::Player { id } => serde_json::to_value(api.player(*id, options).await?)?,
        Command::SearchPlayers { query } => {
            serde_json::to_value(api.search_players(query, options).await?)?
        }
        Command::Venue { id } => serde_json::to_value(api.venue(*id, options).await?)?,
        Command::Fixture { id } => serde_json::to_value(api.fixture(*id, options).await?)?,
        Command::Fixtures { start, end, team } => {
            serde_json::to_value(api.fixtures_between(*start, *end, *team, options).await?)?
        }
        Command::H2h { team_a, team_b } => {
            serde_json::to_value(api.head_to_head(*team_a, *team_b, options).await?)?
        }
        Command::Livescores => serde_json::to_value(api.livescores(options).await?)?,
        Command::Leagues => serde_json::to_value(api.leagues(options).await?)?,
        Command::League { id } => serde_json::to_value(api.league(*id, options).await?)?,
        Command::Season { id } => serde_json::to_value(api.season(*id, options).await?)?,
        Command::Standings { season } => {
            serde_json::to_value(api.standings(*season, options).await?)?
        }
        Command::LiveStandings { league } => {
            serde_json::to_value(api.live_standings(*league, options).await?)?
        }
        Command::TopScorers { season } => {
            serde_json::to_value(api.top_scorers(*season, options).await?)?
        }
        Command::Predictions { fixture } => {
            serde_json::to_value(api.predictions(*fixture, options).await?)?
        }
        Command::Odds { fixture } => {
            serde_json::to_value(api.pre_match_odds(*fixture, options).await?)?
        }
        Command::InplayOdds { fixture } => {
            serde_json::to_value(api.inplay_odds(*fixture, options).await?)?
        }
        Command::Markets => serde_json::to_value(api.markets(options).await?)?,
        Command::Bookmakers => serde_json::to_value(api.bookmakers(options).await?)?,
    };
    Ok(value)
}
