use chrono::{DateTime, Utc};
use log::debug;
use rustc_hash::FxHashSet;

use super::{sort_records, AggregateStats, SortDirection, SortKey, TimeWindow, TokenFilter};
use crate::config::ViewSettings;
use crate::error::ConfigurationError;
use crate::models::TokenRecord;

/// Default collection cap used by live feeds.
pub const DEFAULT_MAX_SIZE: usize = 20;

/// Per-screen view over a token collection.
///
/// Holds the source records in insertion order (oldest first) plus the
/// current search, sort, time window, sidebar filter and watch set. Derived
/// sequences are recomputed on every call; nothing is cached between setter
/// calls.
///
/// Derivation order is fixed: search, time window, sidebar filter, sort.
#[derive(Debug, Clone)]
pub struct CollectionViewState {
    records: Vec<TokenRecord>,
    search: String,
    sort_key: SortKey,
    sort_direction: SortDirection,
    time_window: TimeWindow,
    filter: TokenFilter,
    watched: FxHashSet<String>,
    max_size: usize,
}

impl Default for CollectionViewState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            search: String::new(),
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
            time_window: TimeWindow::default(),
            filter: TokenFilter::default(),
            watched: FxHashSet::default(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl CollectionViewState {
    /// Build a view over `records` with default settings.
    ///
    /// Later duplicates of an identifier replace earlier ones.
    pub fn new(records: impl IntoIterator<Item = TokenRecord>) -> Self {
        let mut state = Self::default();
        for record in records {
            state.add_record(record);
        }
        state
    }

    pub fn with_settings(
        records: impl IntoIterator<Item = TokenRecord>,
        settings: &ViewSettings,
    ) -> Self {
        let mut state = Self::new(records);
        state.search = settings.search.clone();
        state.sort_key = settings.sort_key;
        state.sort_direction = settings.sort_direction;
        state.time_window = settings.time_window;
        state.filter = settings.filter.clone();
        state.watched = settings.watchlist.iter().cloned().collect();
        state.max_size = settings.max_size;
        state
    }

    // ============================================
    // Settings
    // ============================================

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        self.sort_key = key;
        self.sort_direction = direction;
    }

    /// Parse and apply a sort key and direction. Nothing changes on error.
    pub fn set_sort_named(&mut self, key: &str, direction: &str) -> Result<(), ConfigurationError> {
        let key: SortKey = key.parse()?;
        let direction: SortDirection = direction.parse()?;
        self.set_sort(key, direction);
        Ok(())
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort_direction = self.sort_direction.toggled();
    }

    pub fn set_time_window(&mut self, window: TimeWindow) {
        self.time_window = window;
    }

    /// Parse and apply a time window. Nothing changes on error.
    pub fn set_time_window_named(&mut self, window: &str) -> Result<(), ConfigurationError> {
        self.time_window = window.parse()?;
        Ok(())
    }

    pub fn set_filter(&mut self, filter: TokenFilter) {
        self.filter = filter;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> (SortKey, SortDirection) {
        (self.sort_key, self.sort_direction)
    }

    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    pub fn filter(&self) -> &TokenFilter {
        &self.filter
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    // ============================================
    // Watch set
    // ============================================

    /// Flip membership of `id`. Returns whether it is watched afterwards.
    pub fn toggle_watch(&mut self, id: &str) -> bool {
        if self.watched.remove(id) {
            debug!("Unwatched token {}", id);
            false
        } else {
            debug!("Watching token {}", id);
            self.watched.insert(id.to_string());
            true
        }
    }

    /// Returns false when `id` was not watched.
    pub fn remove_watch(&mut self, id: &str) -> bool {
        self.watched.remove(id)
    }

    pub fn is_watched(&self, id: &str) -> bool {
        self.watched.contains(id)
    }

    pub fn watched(&self) -> &FxHashSet<String> {
        &self.watched
    }

    // ============================================
    // Collection
    // ============================================

    /// Insert a record as the newest entry.
    ///
    /// A record whose identifier is already present replaces the old snapshot
    /// in place.
    pub fn add_record(&mut self, record: TokenRecord) {
        match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn remove_record(&mut self, id: &str) -> Option<TokenRecord> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(index))
    }

    /// Drop the oldest-inserted records until at most `max_size` remain.
    /// Returns how many were evicted.
    pub fn evict_oldest(&mut self, max_size: usize) -> usize {
        let excess = self.records.len().saturating_sub(max_size);
        if excess > 0 {
            self.records.drain(..excess);
            debug!("Evicted {} oldest token(s), {} remain", excess, self.records.len());
        }
        excess
    }

    /// Add a batch from a feed, then trim to the configured cap.
    pub fn ingest(&mut self, records: impl IntoIterator<Item = TokenRecord>) -> usize {
        for record in records {
            self.add_record(record);
        }
        self.evict_oldest(self.max_size)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn get(&self, id: &str) -> Option<&TokenRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Source records, oldest first, ignoring every view setting.
    pub fn records(&self) -> &[TokenRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ============================================
    // Derived views
    // ============================================

    fn matches_search(&self, token: &TokenRecord, needle: &str) -> bool {
        needle.is_empty()
            || token.name().to_lowercase().contains(needle)
            || token.symbol().to_lowercase().contains(needle)
    }

    fn filtered_at(&self, now: DateTime<Utc>) -> impl Iterator<Item = &TokenRecord> + '_ {
        let needle = self.search.to_lowercase();
        self.records.iter().filter(move |token| {
            self.matches_search(token, &needle)
                && self.time_window.contains(token.last_updated(), now)
                && self.filter.matches(token)
        })
    }

    pub fn derive(&self) -> Vec<TokenRecord> {
        self.derive_at(Utc::now())
    }

    /// Filtered and sorted view, evaluating the time window against `now`.
    pub fn derive_at(&self, now: DateTime<Utc>) -> Vec<TokenRecord> {
        let mut view: Vec<TokenRecord> = self.filtered_at(now).cloned().collect();
        sort_records(&mut view, self.sort_key, self.sort_direction);
        view
    }

    /// Same as [`derive`](Self::derive), restricted to watched tokens.
    pub fn derive_watched(&self) -> Vec<TokenRecord> {
        let mut view = self.derive();
        view.retain(|token| self.watched.contains(token.id()));
        view
    }

    pub fn aggregate_stats(&self) -> AggregateStats {
        self.aggregate_stats_at(Utc::now())
    }

    /// Statistics over the filtered set. Sort order does not matter here.
    pub fn aggregate_stats_at(&self, now: DateTime<Utc>) -> AggregateStats {
        AggregateStats::from_records(self.filtered_at(now))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::models::{test_params, test_record, Chain};
    use crate::view::Bounds;

    fn demo_state() -> CollectionViewState {
        CollectionViewState::new(vec![
            test_record("1", "SafeMoon Clone", "SAFEMOON", 85),
            test_record("2", "Doge Inu", "DOGEINU", 45),
            test_record("3", "Pepe Token", "PEPE", 92),
        ])
    }

    fn ids(records: &[TokenRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id()).collect()
    }

    fn aged(id: &str, name: &str, risk: i64, age: Duration, now: DateTime<Utc>) -> TokenRecord {
        let mut p = test_params(id, name, "TKN", risk);
        p.last_updated = now - age;
        TokenRecord::try_from(p).unwrap()
    }

    #[test]
    fn test_defaults() {
        let state = CollectionViewState::default();
        assert_eq!(state.search(), "");
        assert_eq!(state.sort(), (SortKey::RiskScore, SortDirection::Desc));
        assert_eq!(state.time_window(), TimeWindow::None);
        assert!(state.watched().is_empty());
        assert_eq!(state.max_size(), 20);
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let mut state = demo_state();
        state.set_search("doge");
        assert_eq!(ids(&state.derive()), vec!["2"]);
    }

    #[test]
    fn test_search_matches_symbol() {
        let mut state = demo_state();
        state.set_search("PEP");
        assert_eq!(ids(&state.derive()), vec!["3"]);

        state.set_search("nothing like this");
        assert!(state.derive().is_empty());
    }

    #[test]
    fn test_default_derive_sorts_by_risk_descending() {
        let state = demo_state();
        assert_eq!(ids(&state.derive()), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_time_window_filters_stale_records() {
        let now = Utc::now();
        let mut state = CollectionViewState::new(vec![
            aged("old", "Old", 50, Duration::hours(2), now),
            aged("fresh", "Fresh", 50, Duration::minutes(10), now),
        ]);

        state.set_time_window(TimeWindow::OneHour);
        assert_eq!(ids(&state.derive_at(now)), vec!["fresh"]);

        state.set_time_window(TimeWindow::None);
        assert_eq!(state.derive_at(now).len(), 2);
    }

    #[test]
    fn test_search_and_window_are_conjunctive() {
        let now = Utc::now();
        let mut state = CollectionViewState::new(vec![
            aged("a", "Doge Old", 50, Duration::hours(30), now),
            aged("b", "Doge New", 50, Duration::minutes(5), now),
            aged("c", "Pepe New", 50, Duration::minutes(5), now),
        ]);

        state.set_search("doge");
        state.set_time_window(TimeWindow::OneDay);
        assert_eq!(ids(&state.derive_at(now)), vec!["b"]);
    }

    #[test]
    fn test_toggle_watch_round_trip() {
        let mut state = demo_state();
        state.toggle_watch("9");
        let before = state.watched().clone();

        assert!(state.toggle_watch("1"));
        assert!(state.is_watched("1"));
        assert!(!state.toggle_watch("1"));

        assert_eq!(state.watched(), &before);
    }

    #[test]
    fn test_remove_watch_of_non_member_is_noop() {
        let mut state = demo_state();
        assert!(!state.remove_watch("missing"));
        state.toggle_watch("2");
        assert!(state.remove_watch("2"));
        assert!(state.watched().is_empty());
    }

    #[test]
    fn test_derive_watched() {
        let mut state = demo_state();
        state.toggle_watch("1");
        state.toggle_watch("2");
        assert_eq!(ids(&state.derive_watched()), vec!["1", "2"]);
    }

    #[test]
    fn test_evict_oldest_keeps_newest() {
        let mut state = CollectionViewState::new(
            (0..21).map(|i| test_record(&i.to_string(), "Token", "TKN", 50)),
        );
        assert_eq!(state.len(), 21);

        assert_eq!(state.evict_oldest(20), 1);
        assert_eq!(state.len(), 20);
        assert!(state.get("0").is_none());
        assert!(state.get("1").is_some());
        assert!(state.get("20").is_some());

        assert_eq!(state.evict_oldest(20), 0);
    }

    #[test]
    fn test_ingest_applies_cap() {
        let mut state = CollectionViewState::new(
            (0..20).map(|i| test_record(&format!("seed-{}", i), "Seed", "SEED", 10)),
        );
        let evicted = state.ingest(vec![test_record("new", "New", "NEW", 90)]);

        assert_eq!(evicted, 1);
        assert_eq!(state.len(), 20);
        assert!(state.get("seed-0").is_none());
        assert!(state.get("new").is_some());
    }

    #[test]
    fn test_add_record_with_existing_id_replaces_it() {
        let mut state = demo_state();
        let updated = state.get("2").unwrap().updated(|p| p.risk_score = 99).unwrap();
        state.add_record(updated);

        assert_eq!(state.len(), 3);
        assert_eq!(state.get("2").unwrap().risk_score(), 99);
        assert_eq!(ids(state.records()), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut state = demo_state();
        assert_eq!(state.remove_record("1").unwrap().name(), "SafeMoon Clone");
        assert!(state.remove_record("1").is_none());
        assert_eq!(state.len(), 2);

        state.clear();
        assert!(state.is_empty());
        assert!(state.derive().is_empty());
    }

    #[test]
    fn test_aggregate_stats_ignore_sort_and_follow_filters() {
        let mut state = demo_state();
        let stats = state.aggregate_stats();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.high_risk_count, 2);
        assert_eq!(stats.average_risk_score, 74);

        state.set_sort(SortKey::Name, SortDirection::Asc);
        assert_eq!(state.aggregate_stats(), stats);

        state.set_search("doge");
        let stats = state.aggregate_stats();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.high_risk_count, 0);
        assert_eq!(stats.average_risk_score, 45);
    }

    #[test]
    fn test_aggregate_stats_follow_time_window() {
        let now = Utc::now();
        let mut state = CollectionViewState::new(vec![
            aged("fresh-high", "Fresh High", 85, Duration::minutes(10), now),
            aged("fresh-low", "Fresh Low", 45, Duration::minutes(50), now),
            aged("stale", "Stale", 92, Duration::hours(2), now),
        ]);
        state.set_time_window(TimeWindow::OneHour);

        let stats = state.aggregate_stats_at(now);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.high_risk_count, 1);
        assert_eq!(stats.total_volume, 300_000.0);
        assert_eq!(stats.average_risk_score, 65);

        state.set_time_window(TimeWindow::None);
        let stats = state.aggregate_stats_at(now);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.high_risk_count, 2);
    }

    #[test]
    fn test_aggregate_stats_on_empty_collection() {
        let state = CollectionViewState::default();
        let stats = state.aggregate_stats();
        assert_eq!(stats.count, 0);
        assert_eq!(stats.high_risk_count, 0);
        assert_eq!(stats.total_volume, 0.0);
        assert_eq!(stats.average_risk_score, 0);
    }

    #[test]
    fn test_named_setters_reject_unknown_values_and_keep_state() {
        let mut state = demo_state();
        state.set_sort_named("price", "asc").unwrap();
        assert_eq!(state.sort(), (SortKey::Price, SortDirection::Asc));

        assert_eq!(
            state.set_sort_named("holders", "desc"),
            Err(ConfigurationError::UnknownSortKey("holders".to_string()))
        );
        assert!(state.set_sort_named("name", "up").is_err());
        assert_eq!(state.sort(), (SortKey::Price, SortDirection::Asc));

        state.set_time_window_named("7d").unwrap();
        assert!(state.set_time_window_named("fortnight").is_err());
        assert_eq!(state.time_window(), TimeWindow::SevenDays);
    }

    #[test]
    fn test_sidebar_filter_narrows_view() {
        let mut bsc = test_params("bsc", "Doge Inu", "DOGEINU", 45);
        bsc.chain = Chain::Bsc;
        bsc.liquidity = 500_000.0;
        let mut state = demo_state();
        state.add_record(TokenRecord::try_from(bsc).unwrap());

        state.set_filter(TokenFilter {
            chain: Some(Chain::Bsc),
            ..Default::default()
        });
        assert_eq!(ids(&state.derive()), vec!["bsc"]);

        state.set_filter(TokenFilter {
            liquidity: Bounds::new(Some(300_000.0), None),
            ..Default::default()
        });
        assert_eq!(state.aggregate_stats().count, 1);
    }

    #[test]
    fn test_with_settings() {
        let settings = ViewSettings {
            search: "pepe".to_string(),
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Asc,
            time_window: TimeWindow::SevenDays,
            watchlist: vec!["3".to_string()],
            max_size: 2,
            filter: TokenFilter::default(),
        };
        let mut state = CollectionViewState::with_settings(
            vec![
                test_record("1", "SafeMoon Clone", "SAFEMOON", 85),
                test_record("3", "Pepe Token", "PEPE", 92),
            ],
            &settings,
        );

        assert!(state.is_watched("3"));
        assert_eq!(ids(&state.derive()), vec!["3"]);

        state.ingest(vec![test_record("4", "Moon Token", "MOON", 30)]);
        assert_eq!(state.len(), 2);
        assert!(state.get("1").is_none());
    }
}
