//! HTTP REST API interfaces
//!
//! - `common`: Error mapping and the validated JSON extractor
//! - `modules`: Handlers grouped by resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
