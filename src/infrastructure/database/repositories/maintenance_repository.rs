//! SeaORM implementation of MaintenanceRepository

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::parse_id;
use crate::domain::maintenance::{Maintenance, MaintenanceRepository, MaintenanceStatus};
use crate::infrastructure::database::entities::maintenance;
use crate::shared::errors::{DomainError, DomainResult};

pub struct SeaOrmMaintenanceRepository {
    db: DatabaseConnection,
}

impl SeaOrmMaintenanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_domain(status: maintenance::MaintenanceStatus) -> MaintenanceStatus {
    match status {
        maintenance::MaintenanceStatus::Pending => MaintenanceStatus::Pending,
        maintenance::MaintenanceStatus::Confirmed => MaintenanceStatus::Confirmed,
        maintenance::MaintenanceStatus::Completed => MaintenanceStatus::Completed,
        maintenance::MaintenanceStatus::Cancelled => MaintenanceStatus::Cancelled,
    }
}

fn status_to_entity(status: MaintenanceStatus) -> maintenance::MaintenanceStatus {
    match status {
        MaintenanceStatus::Pending => maintenance::MaintenanceStatus::Pending,
        MaintenanceStatus::Confirmed => maintenance::MaintenanceStatus::Confirmed,
        MaintenanceStatus::Completed => maintenance::MaintenanceStatus::Completed,
        MaintenanceStatus::Cancelled => maintenance::MaintenanceStatus::Cancelled,
    }
}

/// Costs are stored in cents; sub-cent amounts use banker's rounding.
fn cost_to_cents(cost: Decimal) -> DomainResult<i64> {
    (cost * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .ok_or_else(|| DomainError::Validation(format!("cost {} is out of range", cost)))
}

fn cents_to_cost(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn model_to_domain(m: maintenance::Model) -> DomainResult<Maintenance> {
    Ok(Maintenance {
        id: parse_id("maintenance", &m.id)?,
        moto_id: parse_id("moto", &m.moto_id)?,
        date: m.date,
        kind: m.kind,
        description: m.description,
        status: status_to_domain(m.status),
        cost: m.cost_cents.map(cents_to_cost),
    })
}

fn domain_to_active(m: &Maintenance) -> DomainResult<maintenance::ActiveModel> {
    Ok(maintenance::ActiveModel {
        id: Set(m.id.to_string()),
        moto_id: Set(m.moto_id.to_string()),
        date: Set(m.date),
        kind: Set(m.kind.clone()),
        description: Set(m.description.clone()),
        status: Set(status_to_entity(m.status)),
        cost_cents: Set(m.cost.map(cost_to_cents).transpose()?),
    })
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl MaintenanceRepository for SeaOrmMaintenanceRepository {
    async fn list(&self, moto_id: Option<Uuid>) -> DomainResult<Vec<Maintenance>> {
        let mut query = maintenance::Entity::find();
        if let Some(moto_id) = moto_id {
            query = query.filter(maintenance::Column::MotoId.eq(moto_id.to_string()));
        }

        query
            .order_by_desc(maintenance::Column::Date)
            .order_by_asc(maintenance::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Maintenance>> {
        maintenance::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn insert(&self, maintenance: Maintenance) -> DomainResult<Maintenance> {
        let inserted = domain_to_active(&maintenance)?.insert(&self.db).await?;
        model_to_domain(inserted)
    }

    async fn update(&self, maintenance: Maintenance) -> DomainResult<Maintenance> {
        let updated = domain_to_active(&maintenance)?
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => {
                    DomainError::not_found("Maintenance", "id", maintenance.id)
                }
                e => DomainError::from(e),
            })?;
        model_to_domain(updated)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = maintenance::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn count_all(&self) -> DomainResult<u64> {
        Ok(maintenance::Entity::find().count(&self.db).await?)
    }
}
