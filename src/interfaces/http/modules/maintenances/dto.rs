//! Maintenance DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::super::{MAINTENANCES_PATH, MOTOS_PATH};
use crate::domain::maintenance::{Maintenance, MaintenanceInput, MaintenanceStatus};
use crate::shared::listing::Link;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMaintenancesParams {
    /// Only records of this moto
    #[serde(alias = "motoId")]
    pub moto_id: Option<Uuid>,
}

/// Body of `POST` and `PUT /api/v1/maintenances`
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_cost"))]
pub struct MaintenanceRequest {
    #[serde(alias = "motoId")]
    pub moto_id: Uuid,
    /// When the service is (or was) scheduled
    #[serde(alias = "data")]
    pub date: DateTime<Utc>,
    /// Free text such as `Revisao`; defaults to `Outro`
    #[validate(length(max = 40, message = "kind must be at most 40 characters"))]
    #[serde(default, alias = "tipo")]
    pub kind: Option<String>,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    #[serde(default, alias = "descricao")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: MaintenanceStatus,
    #[serde(default, alias = "custo")]
    #[schema(value_type = Option<String>, example = "120.00")]
    pub cost: Option<Decimal>,
}

fn validate_cost(req: &MaintenanceRequest) -> Result<(), ValidationError> {
    match req.cost {
        Some(cost) if cost.is_sign_negative() && !cost.is_zero() => {
            let mut err = ValidationError::new("cost_range");
            err.message = Some("cost must not be negative".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl From<MaintenanceRequest> for MaintenanceInput {
    fn from(r: MaintenanceRequest) -> Self {
        Self {
            moto_id: r.moto_id,
            date: r.date,
            kind: r.kind,
            description: r.description,
            status: r.status,
            cost: r.cost,
        }
    }
}

/// Representation of a maintenance record
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceResource {
    pub id: Uuid,
    pub moto_id: Uuid,
    pub date: DateTime<Utc>,
    pub kind: String,
    pub description: Option<String>,
    pub status: MaintenanceStatus,
    #[schema(value_type = Option<String>, example = "120.00")]
    pub cost: Option<Decimal>,
    pub links: Vec<Link>,
}

impl MaintenanceResource {
    pub fn location(id: Uuid) -> String {
        format!("{}/{}", MAINTENANCES_PATH, id)
    }
}

impl From<Maintenance> for MaintenanceResource {
    fn from(m: Maintenance) -> Self {
        let href = Self::location(m.id);
        let links = vec![
            Link::get("self", href.clone()),
            Link::new("update", href.clone(), "PUT"),
            Link::new("delete", href, "DELETE"),
            Link::get("moto", format!("{}/{}", MOTOS_PATH, m.moto_id)),
        ];
        Self {
            id: m.id,
            moto_id: m.moto_id,
            date: m.date,
            kind: m.kind,
            description: m.description,
            status: m.status,
            cost: m.cost,
            links,
        }
    }
}
