//! Application layer
//!
//! Query adapters over the catalog and the per-session context.

pub mod queries;
pub mod session;

pub use queries::{HeroQueries, QueryCache, QueryState};
pub use session::Session;
