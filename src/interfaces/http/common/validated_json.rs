//! JSON body extractor with `validator` checks
//!
//! Body errors keep the status axum assigns them (400 malformed JSON,
//! 415 wrong content type, 422 wrong shape). Bodies that deserialize but
//! fail `Validate` are 422 with every field problem listed in field order.

use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiError;

/// `Json<T>` that only succeeds when `T::validate()` passes.
///
/// ```ignore
/// async fn create(ValidatedJson(product): ValidatedJson<NewProduct>) { .. }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::new(
                    rejection.status(),
                    format!("Invalid JSON: {}", rejection.body_text()),
                )
            })?;

        value.validate().map_err(|errors| {
            ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, describe(&errors))
        })?;

        Ok(ValidatedJson(value))
    }
}

/// `"field: message; field: message"`, sorted by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let parts: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();

    if parts.is_empty() {
        "Validation failed".to_string()
    } else {
        parts.join("; ")
    }
}
