use serde::{Deserialize, Serialize};

use super::beverage::BeverageRecord;

/// Lifecycle of the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Searching,
}

/// Ephemeral paging/search state of a mounted list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Current page, 1-based.
    pub page: u32,
    pub search: String,
    pub total_pages: u32,
    pub fetching: bool,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            total_pages: 0,
            fetching: false,
        }
    }
}

/// Everything the list view renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListSnapshot {
    pub phase: ListPhase,
    pub page: PageState,
    pub items: Vec<BeverageRecord>,
    pub saved: Vec<BeverageRecord>,
}

impl ListSnapshot {
    /// True when the main list has nothing to show and is not loading.
    pub fn shows_no_results(&self) -> bool {
        self.items.is_empty() && !self.page.fetching
    }
}

/// Number of pages needed for `total` items, `ceil(total / page_size)`.
///
/// A zero page size yields zero pages.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
