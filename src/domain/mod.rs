pub mod catalog;
pub mod product;
pub mod repositories;

// Re-export commonly used types
pub use catalog::{CategoryFilter, PageResult, PaginationEngine, Query, QueryResolver, RawQuery};
pub use product::{NewProduct, Product};
pub use repositories::{DomainResult, ProductRepository};

// Re-export DomainError from support for convenience
pub use crate::support::errors::DomainError;
