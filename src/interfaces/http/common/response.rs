//! Response bodies shared by all endpoints and the domain → HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Plain `{"message": "..."}` body used for errors and acknowledgements
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error returned by handlers; renders as `MessageResponse` with a status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        if !err.is_client_error() {
            error!("Request failed: {}", err);
        }
        match err {
            DomainError::NotFound { entity, .. } => {
                Self::new(StatusCode::NOT_FOUND, format!("{} not found", entity))
            }
            DomainError::Validation(msg) => Self::new(StatusCode::UNPROCESSABLE_ENTITY, msg),
            DomainError::InvalidQuery(msg) => Self::bad_request(msg),
            DomainError::Storage(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Unable to load products")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(MessageResponse::new(self.message))).into_response()
    }
}
