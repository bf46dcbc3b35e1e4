//! Cached catalog queries
//!
//! Each adapter maps a query key plus an input to one `HeroApi` call. Results
//! are cached per key and reported as a loading/error/success tri-state.
//! Failed requests are never retried automatically; the error is cached until
//! the key is invalidated.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::queries::{MAX_CACHED_QUERIES, PAGE_STALE_SECS, SUMMARY_STALE_SECS};
use crate::data::types::{Hero, HeroPage, SummaryInformation};
use crate::error::Result;
use crate::providers::{HeroApi, PageRequest, SearchParams};

/// Status of a query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    /// Not fetched yet
    Loading,
    /// The request failed; holds the error message
    Error(String),
    Success(T),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryState::Error(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryState::Success(_))
    }

    /// The data, if the query succeeded
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }

    /// The error message, if the query failed
    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Error(message) => Some(message),
            _ => None,
        }
    }

    fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(data) => QueryState::Success(data),
            Err(e) => QueryState::Error(e.to_string()),
        }
    }
}

struct CacheEntry<T> {
    state: QueryState<T>,
    fetched_at: Instant,
}

/// Results of one kind of query, keyed by query input
pub struct QueryCache<K, T> {
    entries: HashMap<K, CacheEntry<T>>,
    /// How long a success stays fresh; `None` means forever
    stale_time: Option<Duration>,
    /// Oldest entries are evicted past this many keys
    capacity: usize,
}

impl<K: Eq + Hash + Clone + std::fmt::Debug, T: Clone> QueryCache<K, T> {
    pub fn new(stale_time: Option<Duration>) -> Self {
        Self {
            entries: HashMap::new(),
            stale_time,
            capacity: MAX_CACHED_QUERIES,
        }
    }

    /// Limit the number of cached keys (at least one)
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Current state for `key` without fetching
    pub fn state(&self, key: &K) -> QueryState<T> {
        self.entries
            .get(key)
            .map(|entry| entry.state.clone())
            .unwrap_or(QueryState::Loading)
    }

    /// Return the cached state for `key`, calling `fetch` once if there is
    /// none or the cached success has gone stale
    pub fn fetch<F>(&mut self, key: &K, fetch: F) -> QueryState<T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(entry) = self.entries.get(key) {
            if !self.is_stale(entry) {
                return entry.state.clone();
            }
            debug!(?key, "query is stale, refetching");
        }

        let state = QueryState::from_result(fetch());
        if let QueryState::Error(message) = &state {
            warn!(?key, "query failed: {}", message);
        }
        if !self.entries.contains_key(key) {
            self.evict_to(self.capacity - 1);
        }
        self.entries.insert(
            key.clone(),
            CacheEntry {
                state: state.clone(),
                fetched_at: Instant::now(),
            },
        );
        state
    }

    /// Drop the cached result for `key`
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop the least recently fetched entries until at most `max` remain
    fn evict_to(&mut self, max: usize) {
        while self.entries.len() > max {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.fetched_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    debug!(?key, "evicting cached query");
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }

    fn is_stale(&self, entry: &CacheEntry<T>) -> bool {
        match (&entry.state, self.stale_time) {
            (QueryState::Success(_), Some(stale_time)) => entry.fetched_at.elapsed() >= stale_time,
            _ => false,
        }
    }
}

/// Query client for the hero catalog
pub struct HeroQueries {
    api: Arc<dyn HeroApi>,
    heroes: QueryCache<String, Hero>,
    summary: QueryCache<(), SummaryInformation>,
    pages: QueryCache<PageRequest, HeroPage>,
    searches: QueryCache<SearchParams, Vec<Hero>>,
}

impl HeroQueries {
    pub fn new(api: Arc<dyn HeroApi>) -> Self {
        Self {
            api,
            heroes: QueryCache::new(None),
            summary: QueryCache::new(Some(Duration::from_secs(SUMMARY_STALE_SECS))),
            pages: QueryCache::new(Some(Duration::from_secs(PAGE_STALE_SECS))),
            searches: QueryCache::new(None),
        }
    }

    /// Hero detail, key `["heroes", id_slug]`
    pub fn hero_page(&mut self, id_slug: &str) -> QueryState<Hero> {
        let api = &self.api;
        self.heroes
            .fetch(&id_slug.to_string(), || api.get_hero(id_slug))
    }

    /// Catalog statistics, key `["summary-information"]`
    pub fn hero_summary(&mut self) -> QueryState<SummaryInformation> {
        let api = &self.api;
        self.summary.fetch(&(), || api.get_summary())
    }

    /// One listing page, key `["heroes", {page, limit, category}]`
    pub fn paginated_heroes(&mut self, request: &PageRequest) -> QueryState<HeroPage> {
        let api = &self.api;
        self.pages.fetch(request, || api.get_heroes_page(request))
    }

    /// Search results, key `["search", {name, strength}]`
    pub fn search_heroes(&mut self, params: &SearchParams) -> QueryState<Vec<Hero>> {
        let api = &self.api;
        self.searches.fetch(params, || api.search_heroes(params))
    }

    /// Forget every cached result
    pub fn clear(&mut self) {
        self.heroes.clear();
        self.summary.clear();
        self.pages.clear();
        self.searches.clear();
    }

    pub fn invalidate_hero(&mut self, id_slug: &str) -> bool {
        self.heroes.invalidate(&id_slug.to_string())
    }

    pub fn invalidate_summary(&mut self) -> bool {
        self.summary.invalidate(&())
    }
}
