//! Request types shared by catalog providers

use crate::config::pagination::{DEFAULT_CATEGORY, DEFAULT_LIMIT};
use crate::navigation::page::normalize_page;
use crate::navigation::query::QueryParams;

/// One page of the catalog listing to fetch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    /// 1-based page number, never 0
    pub page: u32,
    /// Heroes per page
    pub limit: u32,
    /// Category filter ("all", "hero", "villain", ...)
    pub category: String,
}

impl PageRequest {
    /// Create a request; page 0 is treated as page 1
    pub fn new(page: u32, limit: u32, category: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            limit,
            category: category.into(),
        }
    }

    /// Create a request for `page` with the default limit and category
    pub fn page(page: u32) -> Self {
        Self::new(page, DEFAULT_LIMIT, DEFAULT_CATEGORY)
    }

    /// Create a request from an unparsed page value such as a query string
    ///
    /// Anything that is not a positive integer means page 1.
    pub fn from_raw_page(raw: &str) -> Self {
        Self::page(normalize_page(Some(raw)))
    }

    /// Set the heroes-per-page limit
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the category filter
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Number of heroes to skip
    pub fn offset(&self) -> u32 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Query parameters sent to the catalog
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset().to_string()),
            ("category", self.category.clone()),
        ]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::page(1)
    }
}

/// Search filters, kept exactly as they appear in the URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchParams {
    pub name: Option<String>,
    /// Minimum strength, forwarded as text
    pub strength: Option<String>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn strength(mut self, strength: impl Into<String>) -> Self {
        self.strength = Some(strength.into());
        self
    }

    /// Read `name` and `strength` from query state
    pub fn from_query(query: &dyn QueryParams) -> Self {
        Self {
            name: query.get_param("name"),
            strength: query.get_param("strength"),
        }
    }

    /// Query parameters sent to the catalog; absent filters are omitted
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(name) = &self.name {
            params.push(("name", name.clone()));
        }
        if let Some(strength) = &self.strength {
            params.push(("strength", strength.clone()));
        }
        params
    }
}
