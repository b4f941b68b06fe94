//! Maintenance business logic service

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::maintenance::{Maintenance, MaintenanceInput};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct MaintenanceService {
    repos: Arc<dyn RepositoryProvider>,
}

impl MaintenanceService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// All records, newest first, optionally for one moto.
    pub async fn list(&self, moto_id: Option<Uuid>) -> DomainResult<Vec<Maintenance>> {
        self.repos.maintenances().list(moto_id).await
    }

    /// History of one moto. The moto itself must exist.
    pub async fn list_for_moto(&self, moto_id: Uuid) -> DomainResult<Vec<Maintenance>> {
        if self.repos.motos().find_by_id(moto_id).await?.is_none() {
            return Err(DomainError::not_found("Moto", "id", moto_id));
        }
        self.repos.maintenances().list(Some(moto_id)).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Maintenance> {
        self.repos
            .maintenances()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Maintenance", "id", id))
    }

    pub async fn create(&self, input: MaintenanceInput) -> DomainResult<Maintenance> {
        let input = input.normalized()?;
        self.ensure_moto(input.moto_id).await?;

        let maintenance = self
            .repos
            .maintenances()
            .insert(Maintenance::new(input))
            .await?;
        info!(
            maintenance_id = %maintenance.id,
            moto_id = %maintenance.moto_id,
            kind = %maintenance.kind,
            "Maintenance recorded"
        );
        Ok(maintenance)
    }

    pub async fn update(&self, id: Uuid, input: MaintenanceInput) -> DomainResult<Maintenance> {
        let mut maintenance = self.get(id).await?;
        let input = input.normalized()?;
        if input.moto_id != maintenance.moto_id {
            self.ensure_moto(input.moto_id).await?;
        }

        maintenance.apply(input);
        let maintenance = self.repos.maintenances().update(maintenance).await?;
        info!(maintenance_id = %id, status = %maintenance.status, "Maintenance updated");
        Ok(maintenance)
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.repos.maintenances().delete(id).await? {
            return Err(DomainError::not_found("Maintenance", "id", id));
        }
        info!(maintenance_id = %id, "Maintenance deleted");
        Ok(())
    }

    async fn ensure_moto(&self, moto_id: Uuid) -> DomainResult<()> {
        match self.repos.motos().find_by_id(moto_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::Unprocessable(format!(
                "moto {} does not exist",
                moto_id
            ))),
        }
    }
}
