//! Infrastructure layer - external concerns

pub mod storage;

pub use storage::{open_repository, InMemoryProductRepository, JsonFileProductRepository};
