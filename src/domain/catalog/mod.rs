//! Catalog browsing core
//!
//! Pure, stateless pieces shared by every listing caller:
//!
//! - [`QueryResolver`] normalizes raw `(page, page size, category)` input
//! - [`PaginationEngine`] filters a product snapshot and cuts one page out of it

pub mod engine;
pub mod query;
pub mod resolver;

pub use engine::{total_pages, Categorized, PaginationEngine};
pub use query::{normalize_category, CategoryFilter, PageResult, Query, ALL_CATEGORIES};
pub use resolver::{
    parse_integer, QueryResolver, RawQuery, DEFAULT_PAGE_SIZE_ALL, DEFAULT_PAGE_SIZE_CATEGORY,
};
