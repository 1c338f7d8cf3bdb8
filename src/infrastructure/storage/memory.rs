//! In-memory product storage

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{DomainError, DomainResult, NewProduct, Product, ProductRepository};

/// In-memory storage for development and testing
///
/// Products stay in insertion order, which is the order pages are cut in.
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
    /// Highest id handed out so far; ids are never reused
    last_id: AtomicI64,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::with_products(Vec::new())
    }

    /// Seed the store; new ids continue after the highest seeded id.
    pub fn with_products(products: Vec<Product>) -> Self {
        let last_id = max_id(&products);
        Self {
            products: RwLock::new(products),
            last_id: AtomicI64::new(last_id),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Highest id in `products`, 0 when empty.
pub(crate) fn max_id(products: &[Product]) -> i64 {
    products.iter().map(|p| p.id).max().unwrap_or(0)
}

/// The id after `last`, or a storage error once the id space is used up.
pub(crate) fn following_id(last: i64) -> DomainResult<i64> {
    last.checked_add(1).ok_or_else(|| ids_exhausted(last))
}

fn ids_exhausted(last: i64) -> DomainError {
    DomainError::Storage(format!("no product id left after {}", last))
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> DomainResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Product>> {
        Ok(self.products.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, product: NewProduct) -> DomainResult<Product> {
        let previous = self
            .last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map_err(ids_exhausted)?;
        let id = previous + 1;
        let product = product.into_product(id, Utc::now().to_rfc3339());
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() != before)
    }

    async fn count(&self) -> DomainResult<usize> {
        Ok(self.products.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, category: &str) -> Product {
        NewProduct::new(format!("Product {id}"), "desc", category, 10.0, 1)
            .into_product(id, String::new())
    }

    #[tokio::test]
    async fn create_assigns_ids_after_seeded_ones() {
        let repo = InMemoryProductRepository::with_products(vec![product(3, "beauty"), product(8, "beauty")]);
        let created = repo
            .create(NewProduct::new("Soap", "Bar soap", "beauty", 2.5, 10))
            .await
            .unwrap();
        assert_eq!(created.id, 9);
        let second = repo
            .create(NewProduct::new("Oil", "Olive oil", "groceries", 7.0, 4))
            .await
            .unwrap();
        assert_eq!(second.id, 10);
        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryProductRepository::with_products(vec![product(1, "beauty")]);
        let created = repo
            .create(NewProduct::new("Soap", "Bar soap", "beauty", 2.5, 10))
            .await
            .unwrap();
        assert!(repo.delete(created.id).await.unwrap());
        let again = repo
            .create(NewProduct::new("Soap", "Bar soap", "beauty", 2.5, 10))
            .await
            .unwrap();
        assert_eq!(again.id, created.id + 1);
    }

    #[tokio::test]
    async fn exhausted_id_space_is_a_storage_error() {
        let repo = InMemoryProductRepository::with_products(vec![product(i64::MAX, "beauty")]);
        let err = repo
            .create(NewProduct::new("Soap", "Bar soap", "beauty", 2.5, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[test]
    fn following_id_checks_overflow() {
        assert_eq!(following_id(0).unwrap(), 1);
        assert!(following_id(i64::MAX).is_err());
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let repo = InMemoryProductRepository::with_products(vec![product(5, "a"), product(2, "b")]);
        repo.create(NewProduct::new("C", "c", "c", 1.0, 0)).await.unwrap();
        let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 2, 6]);
    }

    #[tokio::test]
    async fn delete_reports_missing_ids() {
        let repo = InMemoryProductRepository::with_products(vec![product(1, "beauty")]);
        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
        assert!(repo.find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn snapshots_do_not_observe_later_writes() {
        let repo = InMemoryProductRepository::with_products(vec![product(1, "beauty")]);
        let snapshot = repo.list_all().await.unwrap();
        repo.delete(1).await.unwrap();
        assert_eq!(snapshot.len(), 1);
    }
}
