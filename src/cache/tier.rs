//! Freshness tiers per data category
//!
//! TTLs follow how quickly the upstream truth changes:
//! - Reference data (markets, bookmakers): days
//! - League and season metadata: a day
//! - Team and player profiles: hours
//! - Standings: an hour
//! - Fixture lists and single fixtures: minutes
//! - Predictions, head-to-head and pre-match odds: a couple of minutes
//! - In-play data: seconds

use std::time::Duration;

use super::keys::Category;

/// A named TTL reflecting assumed data volatility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Reference,
    LeagueStatic,
    SemiStatic,
    Standings,
    FixtureList,
    FixtureDetail,
    Volatile,
    Live,
    /// Fallback for tags that no accessor maps
    Default,
}

impl Tier {
    /// Mapped tiers from least to most volatile
    pub const ORDERED: [Tier; 8] = [
        Tier::Reference,
        Tier::LeagueStatic,
        Tier::SemiStatic,
        Tier::Standings,
        Tier::FixtureList,
        Tier::FixtureDetail,
        Tier::Volatile,
        Tier::Live,
    ];

    pub fn ttl(self) -> Duration {
        match self {
            Tier::Reference => Duration::from_secs(7 * 24 * 3600), // 7 days
            Tier::LeagueStatic => Duration::from_secs(24 * 3600),  // 1 day
            Tier::SemiStatic => Duration::from_secs(6 * 3600),     // 6 hours
            Tier::Standings => Duration::from_secs(3600),          // 1 hour
            Tier::FixtureList => Duration::from_secs(15 * 60),     // 15 minutes
            Tier::FixtureDetail => Duration::from_secs(5 * 60),    // 5 minutes
            Tier::Volatile => Duration::from_secs(2 * 60),         // 2 minutes
            Tier::Live => Duration::from_secs(15),
            Tier::Default => Duration::from_secs(10 * 60), // 10 minutes
        }
    }

    /// Tier for a raw category tag, falling back to [`Tier::Default`]
    pub fn for_tag(tag: &str) -> Tier {
        Category::from_tag(tag).map_or(Tier::Default, Category::tier)
    }
}

impl Category {
    /// The tier every key in this family is cached under
    pub fn tier(self) -> Tier {
        match self {
            Category::Markets | Category::Bookmakers => Tier::Reference,
            Category::Leagues | Category::League | Category::Season => Tier::LeagueStatic,
            Category::Team
            | Category::TeamSearch
            | Category::TeamStats
            | Category::Squad
            | Category::Player
            | Category::PlayerSearch
            | Category::Venue => Tier::SemiStatic,
            Category::Standings | Category::TopScorers => Tier::Standings,
            Category::FixturesBetween | Category::TeamSchedule => Tier::FixtureList,
            Category::Fixture => Tier::FixtureDetail,
            Category::Predictions | Category::HeadToHead | Category::PreMatchOdds => {
                Tier::Volatile
            }
            Category::Livescores | Category::LiveStandings | Category::InplayOdds => Tier::Live,
        }
    }

    pub fn ttl(self) -> Duration {
        self.tier().ttl()
    }
}
