use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Well-formed request that references state which does not exist
    /// (e.g. a maintenance record for an unknown moto).
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
