//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::{HeaderName, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::MessageResponse;
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::{request_id_middleware, REQUEST_ID_HEADER};
use super::modules::{health, products};
use crate::application::CatalogService;
use crate::domain::product::{Dimensions, ProductMeta, Review};
use crate::domain::{NewProduct, Product};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::create_product,
        products::delete_product,
        products::list_categories,
    ),
    components(
        schemas(
            Product,
            NewProduct,
            Dimensions,
            Review,
            ProductMeta,
            products::ProductListResponse,
            products::CategoryDto,
            MessageResponse,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    tags(
        (name = "Products", description = "Catalog browsing and management"),
        (name = "Health", description = "Service health")
    ),
    info(
        title = "Catalog Service API",
        version = "1.0.0",
        description = "Paginated, category-filtered product catalog",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(MessageResponse::new("Not found")))
}

/// Create the API router with all routes.
///
/// Product routes are served both at the root and under `/api`.
/// `/metrics` is only mounted when a Prometheus handle is given.
pub fn create_api_router(
    catalog: Arc<CatalogService>,
    prometheus: Option<PrometheusHandle>,
) -> Router {
    let product_state = products::ProductHandlerState {
        catalog: Arc::clone(&catalog),
    };

    let product_routes = Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product).delete(products::delete_product),
        )
        .route("/products/delete/{id}", delete(products::delete_product))
        .route("/categories", get(products::list_categories))
        .with_state(product_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            catalog,
            started_at: Arc::new(Instant::now()),
        });

    let mut router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .merge(product_routes.clone())
        .nest("/api", product_routes);

    if let Some(handle) = prometheus {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    // Clients read the total count header cross-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            HeaderName::from_static(products::TOTAL_COUNT_HEADER),
            HeaderName::from_static(REQUEST_ID_HEADER),
        ]);

    router
        .fallback(not_found)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}
