//! Product aggregate
//!
//! Contains the Product entity, the create-request shape and the repository interface.

pub mod model;
pub mod repository;

pub use model::{Dimensions, NewProduct, Product, ProductMeta, Review, DEFAULT_AVAILABILITY};
pub use repository::ProductRepository;
