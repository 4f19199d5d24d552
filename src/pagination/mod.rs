//! Pagination module
//!
//! Both listing endpoints use 1-based page numbers with a `per_page` size.
//! Draining walks pages upward until a page comes back empty, a configured
//! stop condition fires, or the page ceiling is reached.

mod paginator;
mod types;

pub use paginator::{PageNumberPaginator, DEFAULT_MAX_PAGES};
pub use types::{
    NextPage, Page, PageRequest, PaginationState, StopCondition, ORDERS_PER_PAGE,
    SPONSORS_PER_PAGE,
};
