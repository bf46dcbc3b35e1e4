//! Favorites management
//!
//! The favorite set is an insertion-ordered list of hero snapshots with at
//! most one entry per hero identifier. Every mutation is announced to the
//! registered listeners; persistence is one of those listeners.

use crate::config::favorites::STORAGE_KEY;
use crate::data::storage::{self, KeyValueStorage};
use crate::data::types::Hero;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// What a toggle did to the set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added,
    Removed,
}

/// Notification delivered to listeners after each mutation
#[derive(Debug)]
pub struct FavoriteEvent<'a> {
    pub change: FavoriteChange,
    /// The hero that was appended, or the stored snapshot that was removed
    pub hero: &'a Hero,
    /// The whole set after the mutation
    pub favorites: &'a [Hero],
    /// Store version after the mutation
    pub version: u64,
}

/// Handle returned by [`FavoriteStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FavoriteEvent<'_>) + Send>;

/// Owns the favorite set for one session
pub struct FavoriteStore {
    favorites: Vec<Hero>,
    /// Incremented once per mutation
    version: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl FavoriteStore {
    /// Create an empty store with no persistence attached
    pub fn new() -> Self {
        Self::with_favorites(Vec::new())
    }

    /// Create a store from an existing list, dropping repeated identifiers
    pub fn with_favorites(favorites: Vec<Hero>) -> Self {
        Self {
            favorites: dedup_by_id(favorites),
            version: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Load the persisted set and keep `storage` in sync with every change
    ///
    /// A missing, blank or unreadable value starts the session with no
    /// favorites.
    pub fn initialize(storage: Arc<dyn KeyValueStorage>) -> Self {
        let favorites = read_persisted(storage.as_ref());
        debug!(count = favorites.len(), "loaded favorites");
        let mut store = Self::with_favorites(favorites);
        store.persist_to(storage);
        store
    }

    /// Register a listener that writes the whole set to `storage` after
    /// every mutation
    pub fn persist_to(&mut self, storage: Arc<dyn KeyValueStorage>) -> SubscriptionId {
        self.subscribe(move |event| {
            if let Err(e) = storage::save_json(storage.as_ref(), STORAGE_KEY, event.favorites) {
                warn!("Failed to persist favorites: {}", e);
            }
        })
    }

    /// All favorites in insertion order
    pub fn favorites(&self) -> &[Hero] {
        &self.favorites
    }

    /// Number of favorites
    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Whether a hero with the same identifier is in the set
    pub fn is_favorite(&self, hero: &Hero) -> bool {
        self.contains_id(hero.id())
    }

    /// Whether `id` is in the set
    pub fn contains_id(&self, id: &str) -> bool {
        self.favorites.iter().any(|h| h.id() == id)
    }

    /// Get the stored snapshot for `id`
    pub fn get(&self, id: &str) -> Option<&Hero> {
        self.favorites.iter().find(|h| h.id() == id)
    }

    /// Remove the entry sharing `hero`'s identifier, or append `hero`
    ///
    /// Matching is by identifier only: removing drops the stored snapshot
    /// even if `hero` carries different fields.
    pub fn toggle_favorite(&mut self, hero: &Hero) -> FavoriteChange {
        let (change, affected) = match self.favorites.iter().position(|h| h.id() == hero.id()) {
            Some(index) => (FavoriteChange::Removed, self.favorites.remove(index)),
            None => {
                self.favorites.push(hero.clone());
                (FavoriteChange::Added, hero.clone())
            }
        };

        self.version += 1;
        debug!(id = %affected.id(), ?change, version = self.version, "favorites changed");
        self.notify(change, &affected);
        change
    }

    /// Current version; changes exactly when the set changes
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Register a listener called once after each mutation
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FavoriteEvent<'_>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self, change: FavoriteChange, hero: &Hero) {
        let event = FavoriteEvent {
            change,
            hero,
            favorites: &self.favorites,
            version: self.version,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl Default for FavoriteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FavoriteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoriteStore")
            .field("favorites", &self.favorites)
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Read the stored set, one entry at a time
///
/// Entries that are not objects with a string `id` are skipped; the rest are
/// kept as stored. A value that is not a JSON array means no favorites.
fn read_persisted(storage: &dyn KeyValueStorage) -> Vec<Hero> {
    let entries = match storage::load_json::<Vec<Value>>(storage, STORAGE_KEY) {
        Ok(Some(entries)) => entries,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Ignoring stored favorites: {}", e);
            return Vec::new();
        }
    };

    let total = entries.len();
    let favorites: Vec<Hero> = entries
        .into_iter()
        .filter_map(Hero::from_value)
        .filter(Hero::has_id)
        .collect();
    if favorites.len() != total {
        warn!(skipped = total - favorites.len(), "skipped stored favorites without an id");
    }
    favorites
}

fn dedup_by_id(favorites: Vec<Hero>) -> Vec<Hero> {
    let mut seen = HashSet::new();
    let total = favorites.len();
    let unique: Vec<Hero> = favorites
        .into_iter()
        .filter(|h| seen.insert(h.id().to_string()))
        .collect();
    if unique.len() != total {
        warn!(dropped = total - unique.len(), "dropped duplicate favorites");
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::storage::MemoryStorage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn batman() -> Hero {
        Hero::new("1", "batman")
    }

    fn memory_store(initial: Option<&str>) -> (FavoriteStore, Arc<MemoryStorage>) {
        let storage = Arc::new(match initial {
            Some(value) => MemoryStorage::with_item(STORAGE_KEY, value),
            None => MemoryStorage::new(),
        });
        let store = FavoriteStore::initialize(storage.clone());
        (store, storage)
    }

    fn stored(storage: &MemoryStorage) -> Option<String> {
        storage.get_item(STORAGE_KEY).unwrap()
    }

    #[test]
    fn test_initialize_empty_storage() {
        let (store, storage) = memory_store(None);
        assert!(store.favorites().is_empty());
        assert_eq!(store.favorite_count(), 0);
        // Nothing is written until the set changes
        assert_eq!(stored(&storage), None);
    }

    #[test]
    fn test_initialize_from_storage() {
        let (store, _) = memory_store(Some(r#"[{"id":"1","name":"batman"}]"#));
        assert_eq!(store.favorite_count(), 1);
        assert!(store.is_favorite(&Hero::new("1", "")));
        assert_eq!(store.favorites()[0].name(), "batman");
    }

    #[test]
    fn test_initialize_malformed_storage() {
        let (store, _) = memory_store(Some("{not json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_initialize_drops_duplicate_ids() {
        let (store, _) =
            memory_store(Some(r#"[{"id":"1","name":"a"},{"id":"1","name":"b"},{"id":"2"}]"#));
        assert_eq!(store.favorite_count(), 2);
        assert_eq!(store.get("1").unwrap().name(), "a");
    }

    #[test]
    fn test_toggle_adds_and_persists() {
        let (mut store, storage) = memory_store(None);

        let change = store.toggle_favorite(&batman());

        assert_eq!(change, FavoriteChange::Added);
        assert_eq!(store.favorite_count(), 1);
        assert!(store.is_favorite(&batman()));
        assert_eq!(stored(&storage).as_deref(), Some(r#"[{"id":"1","name":"batman"}]"#));
    }

    #[test]
    fn test_toggle_removes_and_persists() {
        let (mut store, storage) = memory_store(Some(r#"[{"id":"1","name":"batman"}]"#));
        assert!(store.is_favorite(&batman()));

        let change = store.toggle_favorite(&batman());

        assert_eq!(change, FavoriteChange::Removed);
        assert_eq!(store.favorite_count(), 0);
        assert!(!store.is_favorite(&batman()));
        assert_eq!(stored(&storage).as_deref(), Some("[]"));
    }

    #[test]
    fn test_toggle_pair_restores_set() {
        let (mut store, _) =
            memory_store(Some(r#"[{"id":"1","name":"batman"},{"id":"2","name":"superman"}]"#));
        let before = store.favorites().to_vec();

        let flash = Hero::new("3", "flash");
        store.toggle_favorite(&flash);
        assert_eq!(store.favorite_count(), 3);
        store.toggle_favorite(&flash);

        assert_eq!(store.favorites(), before.as_slice());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = FavoriteStore::new();
        store.toggle_favorite(&Hero::new("b", "B"));
        store.toggle_favorite(&Hero::new("a", "A"));
        store.toggle_favorite(&Hero::new("c", "C"));
        store.toggle_favorite(&Hero::new("a", "A"));

        let ids: Vec<_> = store.favorites().iter().map(|h| h.id()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_remove_matches_identifier_only() {
        let mut store = FavoriteStore::with_favorites(vec![Hero::new("1", "batman")]);

        let change = store.toggle_favorite(&Hero::new("1", "Bruce Wayne"));

        assert_eq!(change, FavoriteChange::Removed);
        assert!(store.is_empty());
    }

    #[test]
    fn test_persisted_value_round_trips() {
        let (mut store, storage) = memory_store(None);
        let hero: Hero = serde_json::from_str(
            r#"{"id":"9","name":"Cyborg","team":"Justice League","codename":"Vic"}"#,
        )
        .unwrap();

        store.toggle_favorite(&Hero::new("1", "batman"));
        store.toggle_favorite(&hero);

        let raw = stored(&storage).unwrap();
        let persisted: Vec<Hero> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.as_slice(), store.favorites());
        assert_eq!(raw, serde_json::to_string(store.favorites()).unwrap());
    }

    #[test]
    fn test_reinitialize_observes_persisted_changes() {
        let (mut store, storage) = memory_store(None);
        store.toggle_favorite(&batman());

        let reloaded = FavoriteStore::initialize(storage);
        assert_eq!(reloaded.favorites(), store.favorites());
    }

    #[test]
    fn test_listener_called_once_per_mutation() {
        let mut store = FavoriteStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.toggle_favorite(&batman());
        store.toggle_favorite(&batman());
        let _ = store.is_favorite(&batman());

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn test_listener_sees_event() {
        let mut store = FavoriteStore::new();
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |event| {
            sink.lock()
                .unwrap()
                .push((event.change, event.hero.id().to_string(), event.favorites.len(), event.version));
        });

        store.toggle_favorite(&batman());
        store.toggle_favorite(&Hero::new("1", "other snapshot"));

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (FavoriteChange::Added, "1".to_string(), 1, 1),
                (FavoriteChange::Removed, "1".to_string(), 0, 2),
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = FavoriteStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.toggle_favorite(&batman());

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_initialize_registers_persistence_listener() {
        let (store, _) = memory_store(None);
        assert_eq!(store.listener_count(), 1);
    }

    #[test]
    fn test_off_type_snapshots_survive_other_toggles() {
        let raw = r#"[{"id":"1","name":"batman","strength":"9"},{"id":"2","name":null,"speed":7.5,"powers":[]}]"#;
        let (mut store, storage) = memory_store(Some(raw));
        assert_eq!(store.favorite_count(), 2);
        assert!(store.is_favorite(&Hero::new("1", "")));
        assert_eq!(store.get("1").unwrap().strength(), Some(9.0));

        store.toggle_favorite(&Hero::new("3", "flash"));

        assert_eq!(
            stored(&storage).as_deref(),
            Some(r#"[{"id":"1","name":"batman","strength":"9"},{"id":"2","name":null,"speed":7.5,"powers":[]},{"id":"3","name":"flash"}]"#)
        );
    }

    #[test]
    fn test_entries_without_id_are_skipped() {
        let (store, _) = memory_store(Some(r#"[{"name":"nobody"},"text",{"id":5},{"id":"2","name":"superman"}]"#));
        assert_eq!(store.favorite_count(), 1);
        assert!(store.contains_id("2"));
    }

    #[test]
    fn test_non_array_storage_is_empty() {
        let (store, _) = memory_store(Some(r#"{"id":"1"}"#));
        assert!(store.is_empty());
    }
}
