//! Application services

mod catalog;

pub use catalog::{CatalogService, CategorySummary};
