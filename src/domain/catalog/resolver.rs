//! Query resolution: raw caller input → normalized [`Query`]

use serde_json::Value;

use super::query::{CategoryFilter, Query};
use crate::domain::{DomainError, DomainResult};

/// Page size of the unfiltered listing.
pub const DEFAULT_PAGE_SIZE_ALL: i64 = 50;
/// Page size once a category is selected.
pub const DEFAULT_PAGE_SIZE_CATEGORY: i64 = 10;

/// Unvalidated filter input, as received from a caller.
///
/// Fields hold arbitrary JSON values; only the category is type-checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQuery {
    pub page: Option<Value>,
    pub page_size: Option<Value>,
    pub category: Option<Value>,
}

impl RawQuery {
    /// Build from string parameters such as an HTTP query string.
    pub fn from_params(
        page: Option<&str>,
        page_size: Option<&str>,
        category: Option<&str>,
    ) -> Self {
        let text = |v: Option<&str>| v.map(|s| Value::String(s.to_string()));
        Self {
            page: text(page),
            page_size: text(page_size),
            category: text(category),
        }
    }
}

/// Turns [`RawQuery`] values into [`Query`] values.
///
/// Paging input never causes an error: anything unparsable falls back to
/// page 1 and the default page size for the selected category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResolver {
    default_page_size_all: i64,
    default_page_size_category: i64,
    max_page_size: Option<i64>,
}

impl QueryResolver {
    pub fn new(default_page_size_all: i64, default_page_size_category: i64) -> Self {
        Self {
            default_page_size_all,
            default_page_size_category,
            max_page_size: None,
        }
    }

    /// Cap accepted page sizes. Non-positive sizes are left for the engine to reject.
    pub fn with_max_page_size(mut self, max: Option<i64>) -> Self {
        self.max_page_size = max.filter(|m| *m > 0);
        self
    }

    pub fn resolve(&self, raw: &RawQuery) -> DomainResult<Query> {
        let category = match &raw.category {
            None | Some(Value::Null) => CategoryFilter::All,
            Some(Value::String(s)) => CategoryFilter::parse(s),
            Some(other) => {
                return Err(DomainError::Validation(format!(
                    "category must be a string, got {}",
                    json_type_name(other)
                )))
            }
        };

        let page = raw
            .page
            .as_ref()
            .and_then(parse_integer)
            .unwrap_or(1)
            .max(1) as u64;

        let default_size = if category.is_all() {
            self.default_page_size_all
        } else {
            self.default_page_size_category
        };
        let mut page_size = raw
            .page_size
            .as_ref()
            .and_then(parse_integer)
            .unwrap_or(default_size);
        if let Some(max) = self.max_page_size {
            page_size = page_size.min(max);
        }

        Ok(Query::new(page, page_size, category))
    }
}

impl Default for QueryResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE_ALL, DEFAULT_PAGE_SIZE_CATEGORY)
    }
}

/// Integer value of a loosely typed input.
///
/// Numbers are truncated toward zero; strings contribute their leading
/// signed decimal digits (`" 12abc"` → 12). Everything else is `None`.
pub fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_leading_integer(s),
        _ => None,
    }
}

fn parse_leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Saturate instead of failing on absurdly long digit runs.
    let magnitude = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
