//! Page selection from query state

use crate::config::pagination::PAGE_PARAM;

use super::query::QueryParams;

/// Parse a raw page value, falling back to 1
///
/// Only positive integers are pages; `None`, `"abc"`, `"-2"`, `"0"` and
/// `"2.5"` all mean page 1. Surrounding whitespace is ignored.
pub fn normalize_page(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Maps between a page number and the `page` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSelector {
    param: &'static str,
}

impl PageSelector {
    pub fn new() -> Self {
        Self { param: PAGE_PARAM }
    }

    /// Use a different query parameter name
    pub fn with_param(param: &'static str) -> Self {
        Self { param }
    }

    /// Page currently selected by `query`, always >= 1
    pub fn current_page(&self, query: &dyn QueryParams) -> u32 {
        normalize_page(query.get_param(self.param).as_deref())
    }

    /// Select `page` by rewriting the query parameter in place
    pub fn go_to_page(&self, query: &mut dyn QueryParams, page: u32) {
        query.set_param(self.param, &page.max(1).to_string());
    }
}

impl Default for PageSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::query::Location;

    fn current(url: &str) -> u32 {
        PageSelector::new().current_page(&Location::parse(url).unwrap())
    }

    #[test]
    fn test_missing_page() {
        assert_eq!(current("http://localhost/"), 1);
    }

    #[test]
    fn test_non_numeric_page() {
        assert_eq!(current("http://localhost/?page=abc"), 1);
    }

    #[test]
    fn test_negative_and_zero_page() {
        assert_eq!(current("http://localhost/?page=-3"), 1);
        assert_eq!(current("http://localhost/?page=0"), 1);
    }

    #[test]
    fn test_numeric_page() {
        assert_eq!(current("http://localhost/?page=5"), 5);
        assert_eq!(current("http://localhost/?page=3"), 3);
    }

    #[test]
    fn test_normalize_page() {
        assert_eq!(normalize_page(None), 1);
        assert_eq!(normalize_page(Some("")), 1);
        assert_eq!(normalize_page(Some("2.5")), 1);
        assert_eq!(normalize_page(Some(" 7 ")), 7);
        assert_eq!(normalize_page(Some("99999999999999")), 1);
    }

    #[test]
    fn test_go_to_page() {
        let selector = PageSelector::new();
        let mut location = Location::parse("http://localhost/?category=villain").unwrap();

        selector.go_to_page(&mut location, 4);

        assert_eq!(selector.current_page(&location), 4);
        assert_eq!(location.get_param("category").as_deref(), Some("villain"));
        assert_eq!(location.query(), Some("category=villain&page=4"));
    }

    #[test]
    fn test_go_to_page_zero_selects_first() {
        let selector = PageSelector::new();
        let mut location = Location::parse("http://localhost/?page=3").unwrap();
        selector.go_to_page(&mut location, 0);
        assert_eq!(location.get_param("page").as_deref(), Some("1"));
    }

    #[test]
    fn test_custom_param() {
        let selector = PageSelector::with_param("p");
        let location = Location::parse("http://localhost/?p=2&page=9").unwrap();
        assert_eq!(selector.current_page(&location), 2);
    }
}
