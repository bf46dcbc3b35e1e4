//! Data persistence
//!
//! Catalog types, key-value storage, and the favorite set.

pub mod favorites;
pub mod storage;
pub mod types;

// Re-export common types
pub use favorites::{FavoriteChange, FavoriteEvent, FavoriteStore, SubscriptionId};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use types::{Hero, HeroPage, SummaryInformation};
