//! Moto DTOs

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::super::MOTOS_PATH;
use crate::application::MotoQuery;
use crate::domain::moto::{Moto, MotoInput, MotoStatus, MIN_YEAR};
use crate::interfaces::http::common::QueryPairs;
use crate::shared::listing::{Link, PageResult};

/// Query parameters of `GET /api/v1/motos`.
///
/// Portuguese names (`modelo`, `placa`) and camelCase names (`pageSize`,
/// `sortBy`, `sortDir`) are accepted too. Extraction never fails: repeated
/// keys take their first value and unparseable numbers are treated as absent.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMotosParams {
    /// Case-insensitive substring of the model
    pub model: Option<String>,
    /// Case-insensitive substring of the plate
    pub plate: Option<String>,
    /// 1-based page number
    pub page: Option<i64>,
    /// Page size; `0` returns everything unpaged
    pub page_size: Option<i64>,
    /// `model`, `plate` or `year`
    pub sort_by: Option<String>,
    /// `asc` or `desc`
    pub sort_dir: Option<String>,
}

impl From<&QueryPairs> for ListMotosParams {
    fn from(q: &QueryPairs) -> Self {
        let text = |names: &[&str]| q.first(names).map(str::to_string);
        Self {
            model: text(&["model", "modelo"]),
            plate: text(&["plate", "placa"]),
            page: q.first_number(&["page"]),
            page_size: q.first_number(&["page_size", "pageSize"]),
            sort_by: text(&["sort_by", "sortBy"]),
            sort_dir: text(&["sort_dir", "sortDir"]),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ListMotosParams {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from(&QueryPairs::from_uri(&parts.uri)))
    }
}

impl From<ListMotosParams> for MotoQuery {
    fn from(p: ListMotosParams) -> Self {
        Self {
            model: p.model,
            plate: p.plate,
            page: p.page,
            page_size: p.page_size,
            sort_by: p.sort_by,
            sort_dir: p.sort_dir,
        }
    }
}

/// Body of `POST` and `PUT /api/v1/motos`
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_model_year"))]
pub struct MotoRequest {
    #[validate(length(min = 7, max = 8, message = "plate must have 7 or 8 characters"))]
    #[serde(alias = "placa")]
    pub plate: String,
    #[validate(length(min = 1, max = 60, message = "model must be 1-60 characters"))]
    #[serde(alias = "modelo")]
    pub model: String,
    #[serde(alias = "ano")]
    pub year: i32,
    #[validate(length(max = 64, message = "chassis must be at most 64 characters"))]
    #[serde(default, alias = "chassi")]
    pub chassis: Option<String>,
    #[serde(default)]
    pub status: MotoStatus,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be within -90..90"))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be within -180..180"))]
    #[serde(default)]
    pub longitude: Option<f64>,
}

fn validate_model_year(req: &MotoRequest) -> Result<(), ValidationError> {
    let max = Utc::now().year() + 1;
    if (MIN_YEAR..=max).contains(&req.year) {
        return Ok(());
    }
    let mut err = ValidationError::new("year_range");
    err.message = Some(format!("year must be between {} and {}", MIN_YEAR, max).into());
    Err(err)
}

impl From<MotoRequest> for MotoInput {
    fn from(r: MotoRequest) -> Self {
        Self {
            plate: r.plate,
            model: r.model,
            year: r.year,
            chassis: r.chassis,
            status: r.status,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

/// A moto together with what can be done with it
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MotoResource {
    pub id: Uuid,
    pub plate: String,
    pub model: String,
    pub year: i32,
    pub chassis: Option<String>,
    pub status: MotoStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub links: Vec<Link>,
}

impl MotoResource {
    pub fn location(id: Uuid) -> String {
        format!("{}/{}", MOTOS_PATH, id)
    }
}

impl From<Moto> for MotoResource {
    fn from(m: Moto) -> Self {
        let href = Self::location(m.id);
        let links = vec![
            Link::get("self", href.clone()),
            Link::new("update", href.clone(), "PUT"),
            Link::new("delete", href.clone(), "DELETE"),
            Link::get("maintenances", format!("{}/maintenances", href)),
        ];
        Self {
            id: m.id,
            plate: m.plate,
            model: m.model,
            year: m.year,
            chassis: m.chassis,
            status: m.status,
            latitude: m.latitude,
            longitude: m.longitude,
            created_at: m.created_at,
            updated_at: m.updated_at,
            links,
        }
    }
}

/// One page of the fleet. Paging fields are omitted for unpaged results.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MotoListResponse {
    pub items: Vec<MotoResource>,
    /// Matching motos before pagination
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_page: Option<u32>,
    pub links: Vec<Link>,
}

impl From<PageResult<Moto>> for MotoListResponse {
    fn from(result: PageResult<Moto>) -> Self {
        let result = result.map(MotoResource::from);
        Self {
            items: result.items,
            total: result.total,
            page: result.meta.map(|m| m.page),
            page_size: result.meta.map(|m| m.page_size),
            last_page: result.meta.map(|m| m.last_page),
            links: result.links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(year: i32) -> MotoRequest {
        MotoRequest {
            plate: "ABC1D23".into(),
            model: "CG 160".into(),
            year,
            chassis: None,
            status: MotoStatus::Available,
            latitude: Some(-23.5),
            longitude: Some(-46.6),
        }
    }

    #[test]
    fn year_bounds_are_checked_at_the_edge() {
        assert!(request(2022).validate().is_ok());
        assert!(request(1999).validate().is_err());
        assert!(request(Utc::now().year() + 2).validate().is_err());
    }

    #[test]
    fn out_of_range_coordinates_fail() {
        let mut req = request(2022);
        req.latitude = Some(91.0);
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("latitude"));
    }

    fn params(query: &str) -> ListMotosParams {
        ListMotosParams::from(&QueryPairs::parse(query))
    }

    #[test]
    fn aliases_and_garbage_numbers_are_accepted() {
        let p = params("modelo=cg&pageSize=abc&page=2&sortDir=desc");
        assert_eq!(p.model.as_deref(), Some("cg"));
        assert_eq!(p.page, Some(2));
        assert_eq!(p.page_size, None);
        assert_eq!(p.sort_dir.as_deref(), Some("desc"));
    }

    #[test]
    fn repeated_and_mixed_names_keep_the_first_value() {
        let p = params("sortBy=ano&sort_by=placa&page=3&page=1&placa=abc&plate=xyz");
        assert_eq!(p.sort_by.as_deref(), Some("ano"));
        assert_eq!(p.page, Some(3));
        assert_eq!(p.plate.as_deref(), Some("abc"));
        assert!(p.model.is_none());
    }

    #[test]
    fn resource_links_cover_every_action() {
        let now = Utc::now();
        let moto = Moto::new(request(2022).into(), now);
        let id = moto.id;
        let res = MotoResource::from(moto);
        let rels: Vec<_> = res.links.iter().map(|l| (l.rel.as_str(), l.method.as_str())).collect();
        assert_eq!(
            rels,
            vec![("self", "GET"), ("update", "PUT"), ("delete", "DELETE"), ("maintenances", "GET")]
        );
        assert_eq!(res.links[3].href, format!("/api/v1/motos/{}/maintenances", id));
    }
}
