//! Moto repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Moto;
use crate::shared::errors::{DomainError, DomainResult};
use crate::shared::listing::ItemSource;

/// Persistence for motos. The listing side (count + ordered window) comes
/// from [`ItemSource`].
#[async_trait]
pub trait MotoRepository: ItemSource<Moto, Error = DomainError> {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Moto>>;
    async fn find_by_plate(&self, plate: &str) -> DomainResult<Option<Moto>>;
    async fn insert(&self, moto: Moto) -> DomainResult<Moto>;
    async fn update(&self, moto: Moto) -> DomainResult<Moto>;
    /// Delete a moto together with its maintenance records.
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;
    async fn count_all(&self) -> DomainResult<u64>;
}
