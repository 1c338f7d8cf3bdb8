//! JSON-file-backed product storage
//!
//! The file holds a `{"products": [...], "lastId": n}` document. It is read
//! once when the repository is opened and rewritten after every create/delete.
//! `lastId` keeps deleted ids from being handed out again across restarts.

use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::memory::{following_id, max_id};
use crate::domain::{DomainResult, NewProduct, Product, ProductRepository};
use crate::support::errors::InfraError;

#[derive(Debug, Default, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default, rename = "lastId")]
    last_id: Option<i64>,
}

/// Product repository persisted to a single JSON document
pub struct JsonFileProductRepository {
    path: PathBuf,
    products: RwLock<Vec<Product>>,
    /// Only changed while the `products` write lock is held
    last_id: AtomicI64,
}

impl JsonFileProductRepository {
    /// Load the catalog at `path`. A missing file is an empty catalog;
    /// the file is created on the first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, InfraError> {
        let path = path.into();
        let document = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<CatalogDocument>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Catalog file {} not found, starting empty", path.display());
                CatalogDocument::default()
            }
            Err(e) => return Err(e.into()),
        };
        let last_id = document
            .last_id
            .unwrap_or(0)
            .max(max_id(&document.products));
        info!(
            "Loaded {} products from {}",
            document.products.len(),
            path.display()
        );

        Ok(Self {
            path,
            products: RwLock::new(document.products),
            last_id: AtomicI64::new(last_id),
        })
    }

    /// Write `products` to a sibling temp file, then rename it over the catalog.
    async fn persist(&self, products: &[Product], last_id: i64) -> Result<(), InfraError> {
        #[derive(Serialize)]
        struct DocumentRef<'a> {
            products: &'a [Product],
            #[serde(rename = "lastId")]
            last_id: i64,
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(&DocumentRef { products, last_id })?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!("Persisted {} products to {}", products.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for JsonFileProductRepository {
    async fn list_all(&self) -> DomainResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Product>> {
        Ok(self.products.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, product: NewProduct) -> DomainResult<Product> {
        let mut products = self.products.write().await;
        let id = following_id(self.last_id.load(Ordering::SeqCst))?;
        let product = product.into_product(id, Utc::now().to_rfc3339());

        let mut updated = products.clone();
        updated.push(product.clone());
        self.persist(&updated, id).await?;
        *products = updated;
        self.last_id.store(id, Ordering::SeqCst);

        Ok(product)
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        let mut products = self.products.write().await;
        if !products.iter().any(|p| p.id == id) {
            return Ok(false);
        }

        let updated: Vec<Product> = products.iter().filter(|p| p.id != id).cloned().collect();
        self.persist(&updated, self.last_id.load(Ordering::SeqCst))
            .await?;
        *products = updated;

        Ok(true)
    }

    async fn count(&self) -> DomainResult<usize> {
        Ok(self.products.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "products": [
            {"id": 1, "title": "Mascara", "category": "beauty", "price": 9.99, "rating": 4.9},
            {"id": 2, "title": "Apple", "category": "groceries", "price": 1.99}
        ],
        "total": 2, "skip": 0, "limit": 30
    }"#;

    #[tokio::test]
    async fn missing_file_is_an_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileProductRepository::open(dir.path().join("products.json"))
            .await
            .unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn loads_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let repo = JsonFileProductRepository::open(&path).await.unwrap();
        let products = repo.list_all().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Mascara");
        assert_eq!(repo.find_by_id(2).await.unwrap().unwrap().category, "groceries");
    }

    #[tokio::test]
    async fn writes_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("products.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, SAMPLE).unwrap();

        let repo = JsonFileProductRepository::open(&path).await.unwrap();
        let created = repo
            .create(NewProduct::new("Sofa", "Three seater", "furniture", 499.0, 2))
            .await
            .unwrap();
        assert_eq!(created.id, 3);
        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());

        let reopened = JsonFileProductRepository::open(&path).await.unwrap();
        let ids: Vec<i64> = reopened.list_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn deleted_ids_stay_retired_across_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let repo = JsonFileProductRepository::open(&path).await.unwrap();
        let created = repo
            .create(NewProduct::new("Lamp", "Desk lamp", "furniture", 30.0, 5))
            .await
            .unwrap();
        assert_eq!(created.id, 3);
        assert!(repo.delete(3).await.unwrap());
        let next = repo
            .create(NewProduct::new("Lamp", "Desk lamp", "furniture", 30.0, 5))
            .await
            .unwrap();
        assert_eq!(next.id, 4);
        assert!(repo.delete(4).await.unwrap());

        let reopened = JsonFileProductRepository::open(&path).await.unwrap();
        let after_restart = reopened
            .create(NewProduct::new("Chair", "Oak chair", "furniture", 80.0, 2))
            .await
            .unwrap();
        assert_eq!(after_restart.id, 5);
        assert!(reopened.find_by_id(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn exhausted_id_space_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        let doc = format!(
            r#"{{"products": [{{"id": {}, "title": "Max", "category": "beauty"}}]}}"#,
            i64::MAX
        );
        std::fs::write(&path, &doc).unwrap();

        let repo = JsonFileProductRepository::open(&path).await.unwrap();
        let err = repo
            .create(NewProduct::new("Soap", "Bar soap", "beauty", 2.5, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::domain::DomainError::Storage(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), doc);
    }

    #[tokio::test]
    async fn malformed_document_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileProductRepository::open(&path).await.err().unwrap();
        assert!(matches!(err, InfraError::Serialization(_)));
    }
}
