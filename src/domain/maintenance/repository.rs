//! Maintenance repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Maintenance;
use crate::shared::errors::DomainResult;

#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Records ordered by date descending (id ascending on ties),
    /// optionally restricted to one moto.
    async fn list(&self, moto_id: Option<Uuid>) -> DomainResult<Vec<Maintenance>>;
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Maintenance>>;
    async fn insert(&self, maintenance: Maintenance) -> DomainResult<Maintenance>;
    async fn update(&self, maintenance: Maintenance) -> DomainResult<Maintenance>;
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;
    async fn count_all(&self) -> DomainResult<u64>;
}
