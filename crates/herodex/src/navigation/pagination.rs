//! Pagination control model
//!
//! Derives which page buttons to show and which controls are disabled from
//! the current page and the page count. Rendering is left to the frontend.

use crate::config::pagination::MAX_PAGE_BUTTONS;

use super::page::PageSelector;
use super::query::QueryParams;

/// One numbered page button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub number: u32,
    /// True for the button of the current page
    pub active: bool,
}

/// Everything a pagination control needs to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub previous_disabled: bool,
    pub next_disabled: bool,
    pub buttons: Vec<PageButton>,
}

impl PaginationView {
    /// Build the view for `current_page` out of `total_pages`
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        let current_page = current_page.max(1);
        let buttons = page_window(current_page, total_pages, MAX_PAGE_BUTTONS)
            .map(|number| PageButton {
                number,
                active: number == current_page,
            })
            .collect();

        Self {
            current_page,
            total_pages,
            previous_disabled: current_page <= 1,
            next_disabled: current_page >= total_pages,
            buttons,
        }
    }

    /// Build the view for the page selected in `query`
    pub fn from_query(selector: &PageSelector, query: &dyn QueryParams, total_pages: u32) -> Self {
        Self::new(selector.current_page(query), total_pages)
    }

    /// The active button, if the current page is within range
    pub fn active_button(&self) -> Option<&PageButton> {
        self.buttons.iter().find(|b| b.active)
    }

    /// Page reached through "previous", `None` when disabled
    ///
    /// Past the last page this leads back to the last page.
    pub fn previous_page(&self) -> Option<u32> {
        (!self.previous_disabled).then(|| (self.current_page - 1).min(self.total_pages.max(1)))
    }

    /// Page reached through "next", `None` when disabled
    pub fn next_page(&self) -> Option<u32> {
        (!self.next_disabled).then(|| self.current_page + 1)
    }

    /// Handle a click on a numbered button
    ///
    /// Returns false if no such button is shown.
    pub fn click(&self, number: u32, selector: &PageSelector, query: &mut dyn QueryParams) -> bool {
        if !self.buttons.iter().any(|b| b.number == number) {
            return false;
        }
        selector.go_to_page(query, number);
        true
    }

    /// Handle a click on "previous"; a disabled control does nothing
    pub fn click_previous(&self, selector: &PageSelector, query: &mut dyn QueryParams) -> bool {
        match self.previous_page() {
            Some(page) => {
                selector.go_to_page(query, page);
                true
            }
            None => false,
        }
    }

    /// Handle a click on "next"; a disabled control does nothing
    pub fn click_next(&self, selector: &PageSelector, query: &mut dyn QueryParams) -> bool {
        match self.next_page() {
            Some(page) => {
                selector.go_to_page(query, page);
                true
            }
            None => false,
        }
    }
}

/// At most `max` consecutive pages around `current`, clamped to `1..=total`
fn page_window(current: u32, total: u32, max: u32) -> std::ops::RangeInclusive<u32> {
    if total <= max {
        return 1..=total;
    }

    let current = current.clamp(1, total);
    let start = current.saturating_sub(max / 2).max(1);
    let end = start.saturating_add(max - 1).min(total);
    (end - (max - 1))..=end
}
