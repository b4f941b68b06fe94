//! Moto entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum MotoStatus {
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "in_use")]
    InUse,
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "motos")]
pub struct Model {
    /// UUID in its hyphenated text form
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub plate: String,
    pub model: String,
    /// Unicode-lowercased `plate`, the column plate filters match against
    pub plate_search: String,
    /// Unicode-lowercased `model`
    pub model_search: String,
    pub year: i32,
    pub chassis: Option<String>,
    pub status: MotoStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::maintenance::Entity")]
    Maintenances,
}

impl Related<super::maintenance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Maintenances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
