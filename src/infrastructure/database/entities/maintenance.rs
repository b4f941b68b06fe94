//! Maintenance entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum MaintenanceStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maintenances")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub moto_id: String,
    pub date: DateTime<Utc>,
    pub kind: String,
    pub description: Option<String>,
    pub status: MaintenanceStatus,
    /// Cost in the smallest currency unit (cents)
    pub cost_cents: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::moto::Entity",
        from = "Column::MotoId",
        to = "super::moto::Column::Id",
        on_delete = "Cascade"
    )]
    Moto,
}

impl Related<super::moto::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Moto.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
