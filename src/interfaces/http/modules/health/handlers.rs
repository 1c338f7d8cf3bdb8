//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::CatalogService;

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    pub catalog: Arc<CatalogService>,
    pub started_at: Arc<Instant>,
}

/// Service health response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub storage: ComponentHealth,
    pub product_count: Option<u64>,
}

/// Component health status
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is degraded", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let uptime = state.started_at.elapsed().as_secs();

    let storage_start = Instant::now();
    let (storage, product_count) = match state.catalog.repository().count().await {
        Ok(count) => (
            ComponentHealth {
                status: "ok".to_string(),
                latency_ms: Some(storage_start.elapsed().as_millis() as u64),
            },
            Some(count as u64),
        ),
        Err(_) => (
            ComponentHealth {
                status: "error".to_string(),
                latency_ms: None,
            },
            None,
        ),
    };

    let (overall_status, http_status) = if storage.status == "ok" {
        ("ok", StatusCode::OK)
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        http_status,
        Json(HealthResponse {
            status: overall_status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            storage,
            product_count,
        }),
    )
}
