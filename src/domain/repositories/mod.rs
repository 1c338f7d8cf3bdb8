//! Repository contracts for the domain layer
//!
//! Contains:
//! - `DomainResult`: standard result type for domain operations
//! - re-export of the `ProductRepository` port consumed by the catalog

use crate::support::errors::DomainError;

pub use super::product::ProductRepository;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
