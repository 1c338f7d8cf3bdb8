//! Catalog browsing and management service

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use crate::domain::catalog::{normalize_category, ALL_CATEGORIES};
use crate::domain::{
    CategoryFilter, DomainError, DomainResult, NewProduct, PageResult, PaginationEngine, Product,
    ProductRepository, QueryResolver, RawQuery,
};

/// Product count of one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub count: u64,
}

/// Service for catalog listing, detail and add/delete operations
pub struct CatalogService {
    repository: Arc<dyn ProductRepository>,
    resolver: QueryResolver,
    engine: PaginationEngine,
    categories: Vec<String>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn ProductRepository>, resolver: QueryResolver) -> Self {
        Self {
            repository,
            resolver,
            engine: PaginationEngine::new(),
            categories: Vec::new(),
        }
    }

    /// Categories offered to clients even while they hold no products.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.categories.clear();
        for category in categories {
            let name = normalize_category(category.as_ref());
            if !name.is_empty() && name != ALL_CATEGORIES && !self.categories.contains(&name) {
                self.categories.push(name);
            }
        }
        self
    }

    pub fn repository(&self) -> &Arc<dyn ProductRepository> {
        &self.repository
    }

    /// Resolve `raw` and return the matching page of a fresh snapshot.
    pub async fn list_products(&self, raw: &RawQuery) -> DomainResult<PageResult<Product>> {
        let query = self.resolver.resolve(raw)?;
        debug!(
            page = query.page(),
            page_size = query.page_size(),
            category = %query.category(),
            "Resolved catalog query"
        );

        let snapshot = self.repository.list_all().await?;
        let page = self.engine.paginate(&snapshot, &query)?;

        if page.is_out_of_range() {
            debug!(
                "Page {} requested but only {} page(s) exist",
                page.current_page, page.total_pages
            );
        }
        Ok(page)
    }

    pub async fn get_product(&self, id: i64) -> DomainResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::product_not_found(id))
    }

    pub async fn create_product(&self, product: NewProduct) -> DomainResult<Product> {
        product
            .validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        let created = self.repository.create(product).await?;
        info!(
            "Product created: {} ({}) in '{}'",
            created.id, created.title, created.category
        );
        Ok(created)
    }

    pub async fn delete_product(&self, id: i64) -> DomainResult<()> {
        if !self.repository.delete(id).await? {
            return Err(DomainError::product_not_found(id));
        }
        info!("Product deleted: {}", id);
        Ok(())
    }

    /// `"all"` with the total count, then every configured category, then
    /// any other category found in the catalog (in order of first appearance).
    pub async fn categories(&self) -> DomainResult<Vec<CategorySummary>> {
        let snapshot = self.repository.list_all().await?;

        let mut names = self.categories.clone();
        for product in &snapshot {
            let name = normalize_category(&product.category);
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }

        let mut summaries = Vec::with_capacity(names.len() + 1);
        summaries.push(CategorySummary {
            name: ALL_CATEGORIES.to_string(),
            count: snapshot.len() as u64,
        });
        for name in names {
            let filter = CategoryFilter::Only(name.clone());
            let count = snapshot.iter().filter(|p| filter.matches(&p.category)).count() as u64;
            summaries.push(CategorySummary { name, count });
        }
        Ok(summaries)
    }
}
