//! Product listing DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::CategorySummary;
use crate::domain::{PageResult, Product, RawQuery};

/// Query string of `GET /products`.
///
/// `_page` and `_limit` are accepted for json-server style clients; the
/// plain names win when both are given. A repeated key keeps its first value.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsParams {
    /// `all` or a category name (case-insensitive)
    pub category: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    #[param(rename = "_page")]
    pub page_alias: Option<String>,
    /// Items per page
    pub limit: Option<String>,
    #[param(rename = "_limit")]
    pub limit_alias: Option<String>,
    #[param(rename = "pageSize")]
    pub page_size: Option<String>,
}

impl ListProductsParams {
    /// Collect the known keys from decoded query pairs; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut params.category,
                "page" => &mut params.page,
                "_page" => &mut params.page_alias,
                "limit" => &mut params.limit,
                "_limit" => &mut params.limit_alias,
                "pageSize" => &mut params.page_size,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

impl From<&ListProductsParams> for RawQuery {
    fn from(params: &ListProductsParams) -> Self {
        let page = params.page.as_deref().or(params.page_alias.as_deref());
        let limit = params
            .limit
            .as_deref()
            .or(params.limit_alias.as_deref())
            .or(params.page_size.as_deref());
        RawQuery::from_params(page, limit, params.category.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_count: u64,
}

impl From<PageResult<Product>> for ProductListResponse {
    fn from(page: PageResult<Product>) -> Self {
        Self {
            products: page.items,
            total_pages: page.total_pages,
            current_page: page.current_page,
            total_count: page.total_count,
        }
    }
}

/// Entry of `GET /categories`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub name: String,
    pub count: u64,
}

impl From<CategorySummary> for CategoryDto {
    fn from(c: CategorySummary) -> Self {
        Self {
            name: c.name,
            count: c.count,
        }
    }
}
