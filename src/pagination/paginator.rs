//! Page-number paginator

use super::types::{NextPage, Page, PageRequest, PaginationState, StopCondition};
use crate::error::{Error, Result};
use tracing::{debug, warn};

/// Ceiling on pages fetched by one drain
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

/// Walks `page=1,2,3...` with a fixed `per_page`.
///
/// An empty page always ends the walk. `max_pages` bounds the number of
/// requests so an endpoint that never returns an empty page cannot loop
/// forever.
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// First page number
    pub start_page: u32,
    /// Page size
    pub per_page: u32,
    /// Maximum number of pages to request
    pub max_pages: u32,
    /// Extra stop condition
    pub stop_condition: StopCondition,
}

impl PageNumberPaginator {
    /// Create a paginator starting at page 1
    pub fn new(per_page: u32) -> Self {
        Self {
            start_page: 1,
            per_page,
            max_pages: DEFAULT_MAX_PAGES,
            stop_condition: StopCondition::EmptyPage,
        }
    }

    /// Set the page ceiling
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set stop condition
    #[must_use]
    pub fn with_stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_condition = condition;
        self
    }

    /// The first request of a drain
    pub fn initial_request(&self) -> PageRequest {
        PageRequest::new(self.start_page, self.per_page)
    }

    /// Record `page` and decide what to fetch next.
    ///
    /// Fails with `PageLimitExceeded` when another page is needed but
    /// `max_pages` requests have already been made.
    pub fn process_page<T>(&self, page: &Page<T>, state: &mut PaginationState) -> Result<NextPage> {
        state.record_page(page.current_page, page.len());

        if page.is_empty() {
            debug!("Page {} is empty, pagination complete", page.current_page);
            state.mark_done();
            return Ok(NextPage::Done);
        }

        if self.stop_condition == StopCondition::TotalPages {
            if let Some(total) = page.total_pages {
                if page.current_page >= total {
                    debug!("Reached last reported page {}", total);
                    state.mark_done();
                    return Ok(NextPage::Done);
                }
            }
        }

        if state.pages_fetched >= self.max_pages {
            warn!(
                "Stopping after {} pages without reaching an empty page",
                state.pages_fetched
            );
            return Err(Error::PageLimitExceeded {
                max_pages: self.max_pages,
            });
        }

        Ok(NextPage::Continue(
            PageRequest::new(page.current_page, self.per_page).next(),
        ))
    }
}
