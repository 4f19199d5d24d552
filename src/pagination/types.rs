//! Pagination types

use crate::error::Result;
use crate::params::RequestParams;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default page size for `query-order`
pub const ORDERS_PER_PAGE: u32 = 50;

/// Default page size for `query-sponsor`
pub const SPONSORS_PER_PAGE: u32 = 20;

/// Which page to ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page index
    pub page: u32,
    /// Page size
    pub per_page: u32,
}

impl PageRequest {
    /// Create a page request
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// First page of orders with the default size (1, 50)
    pub fn orders() -> Self {
        Self::new(1, ORDERS_PER_PAGE)
    }

    /// First page of sponsors with the default size (1, 20)
    pub fn sponsors() -> Self {
        Self::new(1, SPONSORS_PER_PAGE)
    }

    /// The following page with the same size
    #[must_use]
    pub fn next(self) -> Self {
        Self::new(self.page.saturating_add(1), self.per_page)
    }
}

impl From<PageRequest> for RequestParams {
    fn from(request: PageRequest) -> Self {
        RequestParams::page(request.page, request.per_page)
    }
}

/// One page of results.
///
/// `items` is read from `data.list`; a body without that array is an
/// empty page. The totals are whatever the server reported, if anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T = Value> {
    /// Records on this page
    pub items: Vec<T>,
    /// `data.total_count`
    pub total_count: Option<u64>,
    /// `data.total_page`
    pub total_pages: Option<u32>,
    /// The page index that was requested
    pub current_page: u32,
}

impl Page<Value> {
    /// Read a page out of a raw response body
    pub fn from_response(body: &Value, current_page: u32) -> Self {
        let data = body.get("data");
        let items = data
            .and_then(|d| d.get("list"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Self {
            items,
            total_count: data.and_then(|d| d.get("total_count")).and_then(as_u64),
            total_pages: data
                .and_then(|d| d.get("total_page"))
                .and_then(as_u64)
                .and_then(|n| u32::try_from(n).ok()),
            current_page,
        }
    }

    /// Decode every item into `T`
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<Page<T>> {
        let items = self
            .items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()?;

        Ok(Page {
            items,
            total_count: self.total_count,
            total_pages: self.total_pages,
            current_page: self.current_page,
        })
    }
}

impl<T> Page<T> {
    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when the server reports pages after this one
    pub fn has_more(&self) -> bool {
        self.total_pages
            .is_some_and(|total| self.current_page < total)
    }
}

/// Accept both `5` and `"5"`; the platform is not consistent about it
fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// When draining should stop, besides the page ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopCondition {
    /// Stop on the first page whose list is empty or absent
    #[default]
    EmptyPage,

    /// Also stop once the current page reaches `data.total_page`
    TotalPages,
}

/// Result of processing one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch this page next
    Continue(PageRequest),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Tracks progress while draining
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Last page index processed
    pub page: u32,
    /// Requests made so far
    pub pages_fetched: u32,
    /// Items collected so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a processed page
    pub fn record_page(&mut self, page: u32, items: usize) {
        self.page = page;
        self.pages_fetched += 1;
        self.total_fetched += items as u64;
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }
}
