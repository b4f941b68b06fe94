//! Moto domain entity

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::errors::{DomainError, DomainResult};
use crate::shared::listing::{FilterField, Listable, SortField, SortKey};

/// Earliest accepted model year
pub const MIN_YEAR: i32 = 2000;

/// Operational status of a motorcycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MotoStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
}

impl MotoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::InUse => "in_use",
            Self::Maintenance => "maintenance",
        }
    }
}

impl std::fmt::Display for MotoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Motorcycle in the fleet
#[derive(Debug, Clone, PartialEq)]
pub struct Moto {
    pub id: Uuid,
    /// License plate, unique across the fleet
    pub plate: String,
    pub model: String,
    pub year: i32,
    /// Chassis number (VIN)
    pub chassis: Option<String>,
    pub status: MotoStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable fields of a moto, shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct MotoInput {
    pub plate: String,
    pub model: String,
    pub year: i32,
    pub chassis: Option<String>,
    pub status: MotoStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl MotoInput {
    /// Trim text fields and check the rules that depend on the clock.
    pub fn normalized(mut self, now: DateTime<Utc>) -> DomainResult<Self> {
        self.plate = self.plate.trim().to_uppercase();
        self.model = self.model.trim().to_string();
        self.chassis = self
            .chassis
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let max_year = now.year() + 1;
        if self.year < MIN_YEAR || self.year > max_year {
            return Err(DomainError::Validation(format!(
                "year must be between {} and {}",
                MIN_YEAR, max_year
            )));
        }
        if self.plate.chars().count() < 7 || self.plate.chars().count() > 8 {
            return Err(DomainError::Validation(
                "plate must have 7 or 8 characters".to_string(),
            ));
        }
        if self.model.is_empty() {
            return Err(DomainError::Validation("model is required".to_string()));
        }
        Ok(self)
    }
}

impl Moto {
    pub fn new(input: MotoInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            plate: input.plate,
            model: input.model,
            year: input.year,
            chassis: input.chassis,
            status: input.status,
            latitude: input.latitude,
            longitude: input.longitude,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the writable fields, keeping identity and creation time.
    pub fn apply(&mut self, input: MotoInput, now: DateTime<Utc>) {
        self.plate = input.plate;
        self.model = input.model;
        self.year = input.year;
        self.chassis = input.chassis;
        self.status = input.status;
        self.latitude = input.latitude;
        self.longitude = input.longitude;
        self.updated_at = now;
    }
}

/// Text fields of [`Moto`] that accept substring filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotoFilter {
    Model,
    Plate,
}

impl FilterField for MotoFilter {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Plate => "plate",
        }
    }
}

/// Sortable fields of [`Moto`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotoSortField {
    Model,
    Plate,
    Year,
}

impl SortField for MotoSortField {
    const DEFAULT: Self = Self::Model;

    fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Plate => "plate",
            Self::Year => "year",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "model" | "modelo" => Some(Self::Model),
            "plate" | "placa" => Some(Self::Plate),
            "year" | "ano" => Some(Self::Year),
            _ => None,
        }
    }
}

impl Listable for Moto {
    type Filter = MotoFilter;
    type Sort = MotoSortField;
    type Key = Uuid;

    fn filter_text(&self, field: MotoFilter) -> &str {
        match field {
            MotoFilter::Model => &self.model,
            MotoFilter::Plate => &self.plate,
        }
    }

    fn sort_key(&self, field: MotoSortField) -> SortKey<'_> {
        match field {
            MotoSortField::Model => SortKey::Text(&self.model),
            MotoSortField::Plate => SortKey::Text(&self.plate),
            MotoSortField::Year => SortKey::Integer(self.year as i64),
        }
    }

    fn unique_key(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn input(plate: &str, year: i32) -> MotoInput {
        MotoInput {
            plate: plate.to_string(),
            model: " CG 160 ".to_string(),
            year,
            chassis: Some("  ".to_string()),
            status: MotoStatus::Available,
            latitude: None,
            longitude: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn normalized_trims_and_uppercases() {
        let input = input(" abc1d23 ", 2024).normalized(now()).unwrap();
        assert_eq!(input.plate, "ABC1D23");
        assert_eq!(input.model, "CG 160");
        assert_eq!(input.chassis, None);
    }

    #[test]
    fn year_bounds_follow_the_clock() {
        assert!(input("ABC1D23", 2026).normalized(now()).is_ok());
        assert!(matches!(
            input("ABC1D23", 2027).normalized(now()),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            input("ABC1D23", 1999).normalized(now()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn sort_field_accepts_portuguese_aliases() {
        assert_eq!(MotoSortField::parse("Placa"), Some(MotoSortField::Plate));
        assert_eq!(MotoSortField::parse("ANO"), Some(MotoSortField::Year));
        assert_eq!(MotoSortField::parse("modelo"), Some(MotoSortField::Model));
        assert_eq!(MotoSortField::parse("chassis"), None);
    }

    #[test]
    fn apply_keeps_identity() {
        let mut moto = Moto::new(input("ABC1D23", 2022), now());
        let id = moto.id;
        let later = now() + chrono::Duration::hours(1);
        moto.apply(input("XYZ9K88", 2023), later);
        assert_eq!(moto.id, id);
        assert_eq!(moto.created_at, now());
        assert_eq!(moto.updated_at, later);
        assert_eq!(moto.plate, "XYZ9K88");
    }
}
