//! Normalized catalog query and page result value objects

use std::fmt;

/// Sentinel category meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Category selection of a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    All,
    /// Normalized (trimmed, lower-cased) category name
    Only(String),
}

impl CategoryFilter {
    /// Normalize a caller-supplied category name.
    ///
    /// Blank input and any casing of `"all"` select every category.
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize_category(raw);
        if normalized.is_empty() || normalized == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(normalized)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Case-insensitive match against a stored category name.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => normalize_category(category) == *wanted,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(name) => name,
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::All
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn normalize_category(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A normalized `(page, page_size, category)` request.
///
/// `page` is always at least 1. `page_size` is kept as given so the engine
/// can reject non-positive sizes instead of silently fixing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    page: u64,
    page_size: i64,
    category: CategoryFilter,
}

impl Query {
    pub fn new(page: u64, page_size: i64, category: CategoryFilter) -> Self {
        Self {
            page: page.max(1),
            page_size,
            category,
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }
}

/// One page of a filtered collection plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
}

impl<T> PageResult<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `current_page` lies past the last page.
    pub fn is_out_of_range(&self) -> bool {
        self.current_page > self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_normalizes_case_and_whitespace() {
        assert_eq!(CategoryFilter::parse("  Beauty "), CategoryFilter::Only("beauty".into()));
        assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("   "), CategoryFilter::All);
    }

    #[test]
    fn category_matches_ignore_case() {
        let filter = CategoryFilter::parse("groceries");
        assert!(filter.matches("Groceries"));
        assert!(filter.matches(" GROCERIES"));
        assert!(!filter.matches("furniture"));
        assert!(CategoryFilter::All.matches("anything"));
    }

    #[test]
    fn query_page_is_at_least_one() {
        let q = Query::new(0, 10, CategoryFilter::All);
        assert_eq!(q.page(), 1);
        assert_eq!(q.page_size(), 10);
    }
}
