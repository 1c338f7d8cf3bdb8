//! # Catalog Service
//!
//! Product catalog REST service: category filtering and pagination over a
//! product collection, plus product detail, add and delete.
//!
//! ## Architecture
//!
//! - **domain**: Product entity, query resolution and the pagination engine
//! - **application**: Catalog use cases on top of a `ProductRepository`
//! - **infrastructure**: In-memory and JSON file product storage
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Runtime bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

pub use application::CatalogService;
pub use interfaces::http::create_api_router;
