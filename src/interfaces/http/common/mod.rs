//! Shared HTTP building blocks

pub mod response;
pub mod validated_json;

pub use response::{ApiError, MessageResponse};
pub use validated_json::ValidatedJson;
