//! Product repository interface

use async_trait::async_trait;

use super::model::{NewProduct, Product};
use crate::domain::DomainResult;

/// Access to the stored product list.
///
/// `list_all` returns an owned snapshot in storage order; callers never
/// observe later writes through it.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list_all(&self) -> DomainResult<Vec<Product>>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Product>>;
    /// Store a new product under a freshly assigned id.
    async fn create(&self, product: NewProduct) -> DomainResult<Product>;
    /// Returns `false` when no product has this id.
    async fn delete(&self, id: i64) -> DomainResult<bool>;
    async fn count(&self) -> DomainResult<usize>;
}
