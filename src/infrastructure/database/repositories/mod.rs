//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod maintenance_repository;
pub mod moto_repository;
pub mod repository_provider;
pub mod user_repository;

pub use maintenance_repository::SeaOrmMaintenanceRepository;
pub use moto_repository::SeaOrmMotoRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmUserRepository;

use sea_orm::{DbErr, SqlErr};
use uuid::Uuid;

use crate::shared::errors::DomainError;

/// Parse a stored text id back into a UUID.
pub(crate) fn parse_id(entity: &str, raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw)
        .map_err(|e| DomainError::Storage(format!("corrupt {} id '{}': {}", entity, raw, e)))
}

/// Map unique-constraint violations to `Conflict`, everything else to `Storage`.
pub(crate) fn conflict_or_storage(e: DbErr, conflict: impl FnOnce() -> String) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(conflict()),
        _ => DomainError::from(e),
    }
}
