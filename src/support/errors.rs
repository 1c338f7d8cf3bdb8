use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Malformed caller input (non-string category, invalid product body).
    #[error("Validation: {0}")]
    Validation(String),

    /// A query the engine cannot execute, e.g. a non-positive page size.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Storage: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn product_not_found(id: i64) -> Self {
        DomainError::NotFound {
            entity: "Product",
            field: "id",
            value: id.to_string(),
        }
    }

    /// Whether the error comes from the caller's input rather than from
    /// the service itself.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DomainError::Storage(_))
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::Storage(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infra_errors_become_storage_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DomainError = InfraError::from(io).into();
        assert!(matches!(err, DomainError::Storage(ref msg) if msg.contains("denied")));
        assert!(!err.is_client_error());
    }

    #[test]
    fn not_found_message_names_the_product() {
        let err = DomainError::product_not_found(42);
        assert_eq!(err.to_string(), "Not found: Product with id=42");
        assert!(err.is_client_error());
    }
}
