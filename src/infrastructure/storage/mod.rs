//! Product storage implementations

mod json_file;
mod memory;

use std::path::Path;
use std::sync::Arc;

use crate::domain::ProductRepository;
use crate::support::errors::InfraError;

pub use json_file::JsonFileProductRepository;
pub use memory::InMemoryProductRepository;

/// Open the catalog store: a JSON file when `data_path` is set, memory otherwise.
pub async fn open_repository(
    data_path: Option<&Path>,
) -> Result<Arc<dyn ProductRepository>, InfraError> {
    match data_path {
        Some(path) => Ok(Arc::new(JsonFileProductRepository::open(path).await?)),
        None => {
            tracing::warn!("No catalog data path configured, using in-memory storage");
            Ok(Arc::new(InMemoryProductRepository::new()))
        }
    }
}
