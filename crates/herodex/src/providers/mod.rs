//! Hero catalog providers
//!
//! Backends that answer catalog queries (HTTP service, test doubles).

pub mod hero_api;
pub mod traits;
pub mod types;

// Re-exports
pub use hero_api::HttpHeroApi;
pub use traits::HeroApi;
pub use types::{PageRequest, SearchParams};
