//! Hero catalog provider trait
//!
//! Defines the interface that all catalog backends must implement.

use crate::data::types::{Hero, HeroPage, SummaryInformation};
use crate::error::Result;

use super::types::{PageRequest, SearchParams};

/// A source of hero listings
///
/// Each method maps to exactly one outbound request. Implementations return
/// heroes with absolute image URLs.
pub trait HeroApi: Send + Sync {
    /// Look up one hero by identifier or slug
    ///
    /// Fails with `HeroError::NotFound` when the catalog has no such hero.
    fn get_hero(&self, id_slug: &str) -> Result<Hero>;

    /// Fetch one page of the listing
    fn get_heroes_page(&self, request: &PageRequest) -> Result<HeroPage>;

    /// Fetch aggregate statistics
    fn get_summary(&self) -> Result<SummaryInformation>;

    /// Search by name and/or minimum strength
    fn search_heroes(&self, params: &SearchParams) -> Result<Vec<Hero>>;
}
