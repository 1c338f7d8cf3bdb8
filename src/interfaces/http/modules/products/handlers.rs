//! Product handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::debug;

use super::dto::{CategoryDto, ListProductsParams, ProductListResponse};
use crate::application::CatalogService;
use crate::domain::{CategoryFilter, NewProduct, Product, RawQuery};
use crate::interfaces::http::common::{ApiError, MessageResponse, ValidatedJson};

/// Response header carrying the size of the filtered set
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Product handler state
#[derive(Clone)]
pub struct ProductHandlerState {
    pub catalog: Arc<CatalogService>,
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::bad_request("Invalid product id"))
}

fn is_all_category(raw: &str) -> bool {
    CategoryFilter::parse(raw).is_all()
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ListProductsParams),
    responses(
        (status = 200, description = "One page of the filtered catalog", body = ProductListResponse,
            headers(("X-Total-Count" = u64, description = "Number of products matching the filter"))),
        (status = 400, description = "Invalid query", body = MessageResponse),
        (status = 500, description = "Catalog unavailable", body = MessageResponse)
    )
)]
pub async fn list_products(
    State(state): State<ProductHandlerState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(pairs) = pairs.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let params = ListProductsParams::from_pairs(pairs);
    let raw = RawQuery::from(&params);

    let page = state.catalog.list_products(&raw).await?;
    let filtered = if params.category.as_deref().map_or(true, is_all_category) {
        "false"
    } else {
        "true"
    };
    metrics::counter!("catalog_list_requests_total", "filtered" => filtered).increment(1);
    debug!(
        "Listing page {}/{} ({} of {} products)",
        page.current_page,
        page.total_pages,
        page.items.len(),
        page.total_count
    );

    let total = page.total_count.to_string();
    Ok((
        [(TOTAL_COUNT_HEADER, total)],
        Json(ProductListResponse::from(page)),
    ))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product details", body = Product),
        (status = 400, description = "Invalid id", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    )
)]
pub async fn get_product(
    State(state): State<ProductHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let product = state.catalog.get_product(id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Created", body = Product),
        (status = 400, description = "Malformed body", body = MessageResponse),
        (status = 422, description = "Validation error", body = MessageResponse)
    )
)]
pub async fn create_product(
    State(state): State<ProductHandlerState>,
    ValidatedJson(request): ValidatedJson<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.catalog.create_product(request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 400, description = "Invalid id", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    )
)]
pub async fn delete_product(
    State(state): State<ProductHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    state.catalog.delete_product(id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Products",
    responses(
        (status = 200, description = "Categories with product counts", body = Vec<CategoryDto>)
    )
)]
pub async fn list_categories(
    State(state): State<ProductHandlerState>,
) -> Result<Json<Vec<CategoryDto>>, ApiError> {
    let categories = state.catalog.categories().await?;
    Ok(Json(categories.into_iter().map(CategoryDto::from).collect()))
}
