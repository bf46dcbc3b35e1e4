//! URL-driven navigation state
//!
//! Page selection from query parameters and the pagination control model.

pub mod page;
pub mod pagination;
pub mod query;

// Re-exports
pub use page::{normalize_page, PageSelector};
pub use pagination::{PageButton, PaginationView};
pub use query::{Location, QueryParams};
