//! In-memory game catalog: records keyed by file id, with filtered and
//! sorted listing. Persistence is out of scope; the indexer rebuilds
//! the catalog from the configured directories each run.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Most records a single listing returns. The true match count is
/// reported alongside so callers can tell the result was capped.
pub const LIST_LIMIT: usize = 1000;

/// One indexed game: the header metadata flattened next to the file
/// identity. Unset header fields are stored as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// SHA-256 hex of the normalized file path.
    pub id: String,
    pub file_path: String,
    /// Parsed from `date` when it follows `YYYY[-MM[-DD]]`.
    pub played_at: Option<NaiveDate>,
    pub date: String,
    pub event: String,
    pub round: String,
    pub black_player: String,
    pub white_player: String,
    pub black_rank: String,
    pub white_rank: String,
    pub komi: String,
    pub result: String,
    pub black_wins: bool,
    pub white_wins: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    White,
    Black,
    Event,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Which record fields a text query is matched against. A record
/// matches when any enabled scope matches, except that a four-digit
/// query with the year scope on is matched by year alone.
#[derive(Debug, Clone, Copy)]
pub struct SearchScope {
    /// Black and white player names.
    pub player_name: bool,
    /// Event and round.
    pub game_name: bool,
    /// Year of play; claims four-digit queries exclusively.
    pub year: bool,
}

impl Default for SearchScope {
    fn default() -> Self {
        Self {
            player_name: true,
            game_name: true,
            year: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListQuery {
    pub query: Option<String>,
    pub scope: SearchScope,
    pub sort_by: SortBy,
    pub order: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            query: None,
            scope: SearchScope::default(),
            sort_by: SortBy::Date,
            order: SortOrder::Descending,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub games: Vec<GameRecord>,
    /// Matches before the cap was applied.
    pub total: usize,
    pub limit: usize,
}

#[derive(Debug, Default)]
pub struct Catalog {
    games: HashMap<String, GameRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: GameRecord) {
        self.games.insert(record.id.clone(), record);
    }

    pub fn remove(&mut self, id: &str) -> Option<GameRecord> {
        self.games.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&GameRecord> {
        self.games.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.games.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.games.keys()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Filter, sort, and cap the catalog per the query. A blank query
    /// matches everything, as does any query when every scope is
    /// disabled.
    pub fn list(&self, query: &ListQuery) -> ListResult {
        let needle = query
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty());

        let mut matches: Vec<&GameRecord> = self
            .games
            .values()
            .filter(|record| match needle {
                Some(q) => record_matches(record, q, query.scope),
                None => true,
            })
            .collect();

        sort_records(&mut matches, query.sort_by, query.order);

        let total = matches.len();
        matches.truncate(LIST_LIMIT);

        ListResult {
            games: matches.into_iter().cloned().collect(),
            total,
            limit: LIST_LIMIT,
        }
    }
}

fn record_matches(record: &GameRecord, query: &str, scope: SearchScope) -> bool {
    // A four-digit query with the year scope on is a year lookup and
    // nothing else; it never falls through to the name scopes.
    if scope.year {
        if let Some(year) = query_year(query) {
            return record.played_at.map(|d| d.year()) == Some(year);
        }
    }

    let q = query.to_lowercase();
    let mut searched = false;
    if scope.player_name {
        searched = true;
        if record.black_player.to_lowercase().contains(&q)
            || record.white_player.to_lowercase().contains(&q)
        {
            return true;
        }
    }
    if scope.game_name {
        searched = true;
        if record.event.to_lowercase().contains(&q) || record.round.to_lowercase().contains(&q) {
            return true;
        }
    }
    // No enabled scope means the query filters nothing.
    !searched
}

/// A query doubles as a year filter only when it is exactly four digits.
fn query_year(query: &str) -> Option<i32> {
    if query.len() == 4 && query.bytes().all(|b| b.is_ascii_digit()) {
        query.parse().ok()
    } else {
        None
    }
}

fn sort_records(records: &mut [&GameRecord], sort_by: SortBy, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = match sort_by {
            SortBy::White => a
                .white_player
                .to_lowercase()
                .cmp(&b.white_player.to_lowercase()),
            SortBy::Black => a
                .black_player
                .to_lowercase()
                .cmp(&b.black_player.to_lowercase()),
            SortBy::Event => a.event.to_lowercase().cmp(&b.event.to_lowercase()),
            // Undated games order as the minimum, so they land last in
            // the default descending listing.
            SortBy::Date => a.played_at.cmp(&b.played_at),
        };
        let ordering = match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        };
        // Id tie-break keeps the listing stable across runs.
        ordering.then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, black: &str, white: &str, event: &str, date: &str) -> GameRecord {
        GameRecord {
            id: id.to_string(),
            file_path: format!("/games/{id}.sgf"),
            played_at: crate::indexer::parse_sgf_date(date),
            date: date.to_string(),
            event: event.to_string(),
            round: String::new(),
            black_player: black.to_string(),
            white_player: white.to_string(),
            black_rank: String::new(),
            white_rank: String::new(),
            komi: String::new(),
            result: String::new(),
            black_wins: false,
            white_wins: false,
        }
    }

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(record("g1", "Iwamoto", "Sekiyama", "Honinbo", "1941-06-21"));
        catalog.insert(record("g2", "Go Seigen", "Fujisawa", "Jubango", "1953-01-10"));
        catalog.insert(record("g3", "Shusaku", "Gennan", "Castle Game", "1846-09-11"));
        catalog.insert(record("g4", "Anonymous", "Anonymous", "Club Night", ""));
        catalog
    }

    #[test]
    fn test_blank_query_lists_all() {
        let catalog = sample_catalog();
        let result = catalog.list(&ListQuery::default());
        assert_eq!(result.total, 4);
        assert_eq!(result.games.len(), 4);

        let spaces = catalog.list(&ListQuery {
            query: Some("   ".to_string()),
            ..ListQuery::default()
        });
        assert_eq!(spaces.total, 4);
    }

    #[test]
    fn test_player_match_is_case_insensitive_substring() {
        let catalog = sample_catalog();
        let result = catalog.list(&ListQuery {
            query: Some("iwa".to_string()),
            ..ListQuery::default()
        });
        assert_eq!(result.total, 1);
        assert_eq!(result.games[0].id, "g1");
    }

    #[test]
    fn test_event_match_comes_from_game_name_scope() {
        let catalog = sample_catalog();
        let result = catalog.list(&ListQuery {
            query: Some("castle".to_string()),
            scope: SearchScope {
                player_name: false,
                game_name: true,
                year: false,
            },
            ..ListQuery::default()
        });
        assert_eq!(result.total, 1);
        assert_eq!(result.games[0].id, "g3");
    }

    #[test]
    fn test_year_query_matches_played_at() {
        let catalog = sample_catalog();
        let result = catalog.list(&ListQuery {
            query: Some("1941".to_string()),
            ..ListQuery::default()
        });
        assert_eq!(result.total, 1);
        assert_eq!(result.games[0].id, "g1");
    }

    #[test]
    fn test_year_scope_off_falls_through_to_other_scopes() {
        let catalog = sample_catalog();
        let result = catalog.list(&ListQuery {
            query: Some("1941".to_string()),
            scope: SearchScope {
                player_name: true,
                game_name: true,
                year: false,
            },
            ..ListQuery::default()
        });
        // No player or event contains the digits, so nothing matches.
        assert_eq!(result.total, 0);
    }

    #[test]
    fn test_year_query_never_matches_by_name() {
        let mut catalog = Catalog::new();
        catalog.insert(record(
            "g1",
            "Kitani 1941 Study Group",
            "Fujisawa",
            "Jubango",
            "1953-01-10",
        ));

        // Played in 1953, so the year lookup misses and the matching
        // player name is not consulted.
        let by_year = catalog.list(&ListQuery {
            query: Some("1941".to_string()),
            ..ListQuery::default()
        });
        assert_eq!(by_year.total, 0);

        let by_name = catalog.list(&ListQuery {
            query: Some("study".to_string()),
            ..ListQuery::default()
        });
        assert_eq!(by_name.total, 1);
    }

    #[test]
    fn test_no_enabled_scope_filters_nothing() {
        let catalog = sample_catalog();
        let result = catalog.list(&ListQuery {
            query: Some("iwamoto".to_string()),
            scope: SearchScope {
                player_name: false,
                game_name: false,
                year: false,
            },
            ..ListQuery::default()
        });
        assert_eq!(result.total, 4);
    }

    #[test]
    fn test_five_digit_query_is_not_a_year() {
        assert_eq!(query_year("1941"), Some(1941));
        assert_eq!(query_year("19415"), None);
        assert_eq!(query_year("194"), None);
        assert_eq!(query_year("19a1"), None);
    }

    #[test]
    fn test_default_sort_is_date_descending_undated_last() {
        let catalog = sample_catalog();
        let result = catalog.list(&ListQuery::default());
        let ids: Vec<&str> = result.games.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["g2", "g1", "g3", "g4"]);
    }

    #[test]
    fn test_sort_by_white_ascending() {
        let catalog = sample_catalog();
        let result = catalog.list(&ListQuery {
            sort_by: SortBy::White,
            order: SortOrder::Ascending,
            ..ListQuery::default()
        });
        let whites: Vec<&str> = result
            .games
            .iter()
            .map(|g| g.white_player.as_str())
            .collect();
        assert_eq!(whites, vec!["Anonymous", "Fujisawa", "Gennan", "Sekiyama"]);
    }

    #[test]
    fn test_listing_is_capped_with_true_total() {
        let mut catalog = Catalog::new();
        for i in 0..LIST_LIMIT + 5 {
            catalog.insert(record(&format!("g{i:04}"), "B", "W", "Marathon", "2000"));
        }
        let result = catalog.list(&ListQuery::default());
        assert_eq!(result.games.len(), LIST_LIMIT);
        assert_eq!(result.total, LIST_LIMIT + 5);
        assert_eq!(result.limit, LIST_LIMIT);
    }

    #[test]
    fn test_insert_get_remove() {
        let mut catalog = Catalog::new();
        catalog.insert(record("g1", "A", "B", "E", "1990"));
        assert!(catalog.contains("g1"));
        assert_eq!(catalog.get("g1").map(|g| g.black_player.as_str()), Some("A"));
        assert_eq!(catalog.len(), 1);

        let removed = catalog.remove("g1");
        assert!(removed.is_some());
        assert!(catalog.is_empty());
        assert!(catalog.remove("g1").is_none());
    }
}
