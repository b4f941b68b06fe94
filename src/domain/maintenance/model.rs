//! Maintenance domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::errors::{DomainError, DomainResult};

/// Kind used when the caller does not name one
pub const DEFAULT_KIND: &str = "Outro";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A maintenance record attached to a moto
#[derive(Debug, Clone, PartialEq)]
pub struct Maintenance {
    pub id: Uuid,
    pub moto_id: Uuid,
    /// When the maintenance happened or is scheduled
    pub date: DateTime<Utc>,
    /// Free-form kind ("Revisao", "Troca de oleo", ...)
    pub kind: String,
    pub description: Option<String>,
    pub status: MaintenanceStatus,
    pub cost: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceInput {
    pub moto_id: Uuid,
    pub date: DateTime<Utc>,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub status: MaintenanceStatus,
    pub cost: Option<Decimal>,
}

impl MaintenanceInput {
    pub fn normalized(mut self) -> DomainResult<Self> {
        let kind = self
            .kind
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(DEFAULT_KIND)
            .to_string();
        if kind.chars().count() > 40 {
            return Err(DomainError::Validation(
                "kind must have at most 40 characters".to_string(),
            ));
        }
        self.kind = Some(kind);

        if matches!(self.cost, Some(cost) if cost.is_sign_negative() && !cost.is_zero()) {
            return Err(DomainError::Validation("cost must not be negative".to_string()));
        }
        self.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Ok(self)
    }
}

impl Maintenance {
    pub fn new(input: MaintenanceInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            moto_id: input.moto_id,
            date: input.date,
            kind: input.kind.unwrap_or_else(|| DEFAULT_KIND.to_string()),
            description: input.description,
            status: input.status,
            cost: input.cost,
        }
    }

    pub fn apply(&mut self, input: MaintenanceInput) {
        self.moto_id = input.moto_id;
        self.date = input.date;
        self.kind = input.kind.unwrap_or_else(|| DEFAULT_KIND.to_string());
        self.description = input.description;
        self.status = input.status;
        self.cost = input.cost;
    }
}
