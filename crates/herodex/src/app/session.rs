//! Session context
//!
//! One `Session` per active UI session: it owns the favorite set, the query
//! client and the current location, and is handed to consumers explicitly.

use std::sync::Arc;

use tracing::info;

use crate::config::pagination::{DEFAULT_CATEGORY, DEFAULT_LIMIT};
use crate::config::Config;
use crate::data::favorites::{FavoriteChange, FavoriteStore};
use crate::data::storage::{FileStorage, KeyValueStorage};
use crate::data::types::{Hero, HeroPage};
use crate::error::Result;
use crate::navigation::{Location, PageSelector, PaginationView};
use crate::providers::{HeroApi, HttpHeroApi, PageRequest, SearchParams};

use super::queries::{HeroQueries, QueryState};

pub struct Session {
    pub favorites: FavoriteStore,
    pub queries: HeroQueries,
    pub location: Location,
    selector: PageSelector,
}

impl Session {
    /// Assemble a session from its collaborators
    ///
    /// Favorites are loaded from `storage` immediately and written back on
    /// every change.
    pub fn new(api: Arc<dyn HeroApi>, storage: Arc<dyn KeyValueStorage>, location: Location) -> Self {
        Self {
            favorites: FavoriteStore::initialize(storage),
            queries: HeroQueries::new(api),
            location,
            selector: PageSelector::new(),
        }
    }

    /// Session against the HTTP catalog with file-backed favorites
    pub fn from_config(config: &Config, location: Location) -> Result<Self> {
        info!(api = %config.api_base_url, data_dir = ?config.data_dir, "starting session");
        let api = Arc::new(HttpHeroApi::new(config.api_base_url.clone())?);
        let storage = Arc::new(FileStorage::new(config.data_dir.clone()));
        Ok(Self::new(api, storage, location))
    }

    /// Page selected by the current location
    pub fn current_page(&self) -> u32 {
        self.selector.current_page(&self.location)
    }

    /// Select a page in the current location
    pub fn go_to_page(&mut self, page: u32) {
        self.selector.go_to_page(&mut self.location, page);
    }

    /// Pagination control model for the current location
    pub fn pagination(&self, total_pages: u32) -> PaginationView {
        PaginationView::from_query(&self.selector, &self.location, total_pages)
    }

    /// Listing page selected by the current location
    pub fn current_heroes(&mut self, limit: Option<u32>, category: Option<&str>) -> QueryState<HeroPage> {
        let request = PageRequest::new(
            self.current_page(),
            limit.unwrap_or(DEFAULT_LIMIT),
            category.unwrap_or(DEFAULT_CATEGORY),
        );
        self.queries.paginated_heroes(&request)
    }

    /// Search using the `name` and `strength` parameters of the location
    pub fn search(&mut self) -> QueryState<Vec<Hero>> {
        let params = SearchParams::from_query(&self.location);
        self.queries.search_heroes(&params)
    }

    pub fn toggle_favorite(&mut self, hero: &Hero) -> FavoriteChange {
        self.favorites.toggle_favorite(hero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::queries::tests::MockApi;
    use crate::config::favorites::STORAGE_KEY;
    use crate::data::storage::MemoryStorage;

    fn session(url: &str) -> (Session, Arc<MockApi>, Arc<MemoryStorage>) {
        let heroes = (1..=10)
            .map(|i| Hero::new(i.to_string(), format!("Hero {}", i)))
            .collect();
        let api = Arc::new(MockApi::with_heroes(heroes));
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::new(api.clone(), storage.clone(), Location::parse(url).unwrap());
        (session, api, storage)
    }

    #[test]
    fn test_current_heroes_follow_location() {
        let (mut session, api, _) = session("http://localhost/?page=2");

        let state = session.current_heroes(None, None);
        assert_eq!(state.data().unwrap().heroes[0].id(), "7");

        session.go_to_page(1);
        session.current_heroes(Some(10), Some("hero"));

        assert_eq!(api.calls(), vec!["page:6:6:all", "page:0:10:hero"]);
    }

    #[test]
    fn test_pagination_from_location() {
        let (session, _, _) = session("http://localhost/?page=abc");
        let view = session.pagination(2);
        assert_eq!(view.current_page, 1);
        assert!(view.previous_disabled);
    }

    #[test]
    fn test_search_reads_location() {
        let (mut session, api, _) = session("http://localhost/search?name=hero%201");
        let results = session.search();
        assert_eq!(results.data().unwrap().len(), 2); // "Hero 1" and "Hero 10"
        assert_eq!(api.calls(), vec![r#"search:Some("hero 1"):None"#]);
    }

    #[test]
    fn test_toggle_favorite_persists() {
        let (mut session, _, storage) = session("http://localhost/");
        session.toggle_favorite(&Hero::new("1", "batman"));
        assert_eq!(
            storage.get_item(STORAGE_KEY).unwrap().as_deref(),
            Some(r#"[{"id":"1","name":"batman"}]"#)
        );
        assert_eq!(session.favorites.favorite_count(), 1);
    }
}
