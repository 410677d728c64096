//! Cache key scheme
//!
//! Keys are `<category tag>:<param>:<param>...`. Numeric ids are decimal text in
//! the accessor's parameter order, free-text is trimmed and lower-cased, and
//! optional includes append a suffix in a fixed order.

use std::fmt;

use chrono::NaiveDate;

use crate::options::{FetchOptions, OptionalInclude};

/// Delimiter between a key's category tag and its parameters
pub const KEY_DELIMITER: char = ':';

/// Accessor family a cache key belongs to
///
/// Each tag is unique, so keys from different families never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Team,
    TeamSearch,
    TeamStats,
    TeamSchedule,
    Squad,
    Player,
    PlayerSearch,
    Venue,
    Fixture,
    FixturesBetween,
    HeadToHead,
    Livescores,
    Leagues,
    League,
    Season,
    Standings,
    LiveStandings,
    TopScorers,
    Predictions,
    PreMatchOdds,
    InplayOdds,
    Markets,
    Bookmakers,
}

impl Category {
    pub const ALL: [Category; 23] = [
        Category::Team,
        Category::TeamSearch,
        Category::TeamStats,
        Category::TeamSchedule,
        Category::Squad,
        Category::Player,
        Category::PlayerSearch,
        Category::Venue,
        Category::Fixture,
        Category::FixturesBetween,
        Category::HeadToHead,
        Category::Livescores,
        Category::Leagues,
        Category::League,
        Category::Season,
        Category::Standings,
        Category::LiveStandings,
        Category::TopScorers,
        Category::Predictions,
        Category::PreMatchOdds,
        Category::InplayOdds,
        Category::Markets,
        Category::Bookmakers,
    ];

    /// Prefix written at the start of every key in this family
    pub fn tag(self) -> &'static str {
        match self {
            Category::Team => "team",
            Category::TeamSearch => "teamSearch",
            Category::TeamStats => "teamStats",
            Category::TeamSchedule => "teamSchedule",
            Category::Squad => "squad",
            Category::Player => "player",
            Category::PlayerSearch => "playerSearch",
            Category::Venue => "venue",
            Category::Fixture => "fixture",
            Category::FixturesBetween => "fixturesBetween",
            Category::HeadToHead => "h2h",
            Category::Livescores => "livescores",
            Category::Leagues => "leagues",
            Category::League => "league",
            Category::Season => "season",
            Category::Standings => "standings",
            Category::LiveStandings => "liveStandings",
            Category::TopScorers => "topScorers",
            Category::Predictions => "predictions",
            Category::PreMatchOdds => "odds",
            Category::InplayOdds => "liveOdds",
            Category::Markets => "markets",
            Category::Bookmakers => "bookmakers",
        }
    }

    /// Looks up a category by its key tag
    pub fn from_tag(tag: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|category| category.tag() == tag)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Canonical cache key for one logical upstream query
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Starts a key for the given category
    pub fn builder(category: Category) -> KeyBuilder {
        KeyBuilder {
            category,
            buf: category.tag().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Appends parameters to a key in call order
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    category: Category,
    buf: String,
}

impl KeyBuilder {
    /// Category the key is being built for
    pub fn category(&self) -> Category {
        self.category
    }

    fn push(mut self, segment: &str) -> Self {
        self.buf.push(KEY_DELIMITER);
        self.buf.push_str(segment);
        self
    }

    /// Numeric identifier, included verbatim
    pub fn id(self, id: u64) -> Self {
        let segment = id.to_string();
        self.push(&segment)
    }

    /// Free-text search term; case-folded so matching queries share a key
    pub fn search(self, query: &str) -> Self {
        let segment = query.trim().to_lowercase();
        self.push(&segment)
    }

    /// Calendar date as `YYYY-MM-DD`
    pub fn date(self, date: NaiveDate) -> Self {
        let segment = date.format("%Y-%m-%d").to_string();
        self.push(&segment)
    }

    /// Fixed literal discriminator such as `all` or `inplay`
    pub fn literal(self, literal: &str) -> Self {
        self.push(literal)
    }

    /// Appends a suffix for every requested include the accessor supports
    pub fn includes(mut self, options: &FetchOptions, supported: &[OptionalInclude]) -> Self {
        for include in options.active_includes(supported) {
            self = self.push(include.key_suffix());
        }
        self
    }

    pub fn build(self) -> CacheKey {
        CacheKey(self.buf)
    }
}

/// Category tag of a raw key string
pub fn category_of(key: &str) -> &str {
    key.split(KEY_DELIMITER).next().unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_numeric_ids_follow_call_order() {
        let key = CacheKey::builder(Category::TeamStats).id(62).id(19735).build();
        assert_eq!(key.as_str(), "teamStats:62:19735");

        let reversed = CacheKey::builder(Category::TeamStats).id(19735).id(62).build();
        assert_ne!(key, reversed);
    }

    #[test]
    fn test_search_terms_are_case_folded() {
        let upper = CacheKey::builder(Category::TeamSearch).search("Fulham").build();
        let lower = CacheKey::builder(Category::TeamSearch).search("fulham").build();
        let padded = CacheKey::builder(Category::TeamSearch).search("  FULHAM ").build();

        assert_eq!(upper, lower);
        assert_eq!(upper, padded);
        assert_eq!(upper.as_str(), "teamSearch:fulham");
    }

    #[test]
    fn test_enabled_expansion_changes_key() {
        let plain = CacheKey::builder(Category::HeadToHead)
            .id(1)
            .id(2)
            .includes(&FetchOptions::default(), &[OptionalInclude::Odds])
            .build();
        let with_odds = CacheKey::builder(Category::HeadToHead)
            .id(1)
            .id(2)
            .includes(&FetchOptions::default().with_odds(), &[OptionalInclude::Odds])
            .build();

        assert_ne!(plain, with_odds);
        assert_eq!(plain.as_str(), "h2h:1:2");
        assert_eq!(with_odds.as_str(), "h2h:1:2:odds");
    }

    #[test]
    fn test_expansion_suffixes_have_fixed_order() {
        let supported = [OptionalInclude::Sidelined, OptionalInclude::Odds];
        let a = FetchOptions {
            include_sidelined: true,
            include_odds: true,
            ..FetchOptions::default()
        };
        let b = FetchOptions::default().with_sidelined().with_odds();

        let key_a = CacheKey::builder(Category::Fixture).id(5).includes(&a, &supported).build();
        let key_b = CacheKey::builder(Category::Fixture).id(5).includes(&b, &supported).build();

        assert_eq!(key_a, key_b);
        assert_eq!(key_a.as_str(), "fixture:5:odds:sidelined");
    }

    #[test]
    fn test_skip_cache_does_not_change_key() {
        let normal = CacheKey::builder(Category::Fixture)
            .id(9)
            .includes(&FetchOptions::default(), &OptionalInclude::ALL)
            .build();
        let fresh = CacheKey::builder(Category::Fixture)
            .id(9)
            .includes(&FetchOptions::fresh(), &OptionalInclude::ALL)
            .build();
        assert_eq!(normal, fresh);
    }

    #[test]
    fn test_dates_are_iso_formatted() {
        let start = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 8, 31).unwrap();
        let key = CacheKey::builder(Category::FixturesBetween)
            .date(start)
            .date(end)
            .build();
        assert_eq!(key.as_str(), "fixturesBetween:2024-08-01:2024-08-31");
    }

    #[test]
    fn test_category_tags_are_unique() {
        let tags: HashSet<&str> = Category::ALL.iter().map(|c| c.tag()).collect();
        assert_eq!(tags.len(), Category::ALL.len());
    }

    #[test]
    fn test_tags_contain_no_delimiter() {
        for category in Category::ALL {
            assert!(!category.tag().contains(KEY_DELIMITER), "{category}");
        }
    }

    #[test]
    fn test_from_tag_roundtrips_every_category() {
        for category in Category::ALL {
            assert_eq!(Category::from_tag(category.tag()), Some(category));
        }
        assert_eq!(Category::from_tag("unknown"), None);
    }

    #[test]
    fn test_category_of_key() {
        let key = CacheKey::builder(Category::Fixture).id(1).literal("x").build();
        assert_eq!(category_of(key.as_str()), "fixture");
        assert_eq!(category_of("loose"), "loose");
    }
}
