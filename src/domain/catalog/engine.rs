//! Category filtering and page slicing

use super::query::{PageResult, Query};
use crate::domain::{DomainError, DomainResult};

/// Anything that can be filtered by category.
pub trait Categorized {
    fn category(&self) -> &str;
}

impl Categorized for crate::domain::Product {
    fn category(&self) -> &str {
        &self.category
    }
}

/// Number of pages needed for `total_count` items.
///
/// An empty result still has one (empty) page.
pub fn total_pages(total_count: u64, page_size: u64) -> u64 {
    if total_count == 0 || page_size == 0 {
        1
    } else {
        total_count.div_ceil(page_size)
    }
}

/// Applies a [`Query`] to a collection snapshot.
///
/// Stateless and read-only: the input slice is never modified and the
/// relative order of the surviving items is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationEngine;

impl PaginationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn paginate<T>(&self, collection: &[T], query: &Query) -> DomainResult<PageResult<T>>
    where
        T: Categorized + Clone,
    {
        if query.page_size() <= 0 {
            return Err(DomainError::InvalidQuery(format!(
                "page size must be positive, got {}",
                query.page_size()
            )));
        }
        let page_size = query.page_size() as u64;

        let filtered: Vec<&T> = collection
            .iter()
            .filter(|item| query.category().matches(item.category()))
            .collect();

        let total_count = filtered.len() as u64;
        let total_pages = total_pages(total_count, page_size);

        let len = filtered.len();
        let start = (query.page() - 1).saturating_mul(page_size);
        let start = usize::try_from(start).unwrap_or(usize::MAX).min(len);
        let end = start
            .saturating_add(usize::try_from(page_size).unwrap_or(usize::MAX))
            .min(len);

        let items = filtered[start..end].iter().map(|item| (*item).clone()).collect();

        Ok(PageResult {
            items,
            current_page: query.page(),
            total_pages,
            total_count,
        })
    }
}
