//! Moto API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use super::dto::{ListMotosParams, MotoListResponse, MotoRequest, MotoResource};
use crate::application::{MaintenanceService, MotoService};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::maintenances::MaintenanceResource;
use crate::shared::listing::PageResult;

/// Header carrying paging metadata for clients that ignore the body
pub const PAGINATION_HEADER: &str = "x-pagination";

#[derive(Clone)]
pub struct MotoHandlerState {
    pub motos: Arc<MotoService>,
    pub maintenances: Arc<MaintenanceService>,
}

fn pagination_headers<T>(result: &PageResult<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(meta) = result.meta {
        let value = json!({
            "total": result.total,
            "page": meta.page,
            "pageSize": meta.page_size,
            "lastPage": meta.last_page,
        })
        .to_string();
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(HeaderName::from_static(PAGINATION_HEADER), value);
        }
    }
    headers
}

#[utoipa::path(
    get,
    path = "/api/v1/motos",
    tag = "Motos",
    params(ListMotosParams),
    responses(
        (status = 200, description = "Filtered, sorted and paged motos", body = MotoListResponse,
         headers(("X-Pagination" = String, description = "JSON {total, page, pageSize, lastPage}")))
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_motos(
    State(state): State<MotoHandlerState>,
    params: ListMotosParams,
) -> Result<(HeaderMap, Json<MotoListResponse>), ApiError<MotoListResponse>> {
    let result = state.motos.list(params.into()).await.map_err(domain_error)?;
    let headers = pagination_headers(&result);
    Ok((headers, Json(result.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/motos/{id}",
    tag = "Motos",
    params(("id" = Uuid, Path, description = "Moto ID")),
    responses(
        (status = 200, description = "Moto found", body = ApiResponse<MotoResource>),
        (status = 404, description = "Moto not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_moto(
    State(state): State<MotoHandlerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MotoResource>>, ApiError<MotoResource>> {
    let moto = state.motos.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(moto.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/motos",
    tag = "Motos",
    request_body = MotoRequest,
    responses(
        (status = 201, description = "Moto created", body = ApiResponse<MotoResource>,
         headers(("Location" = String, description = "URI of the new moto"))),
        (status = 400, description = "Malformed JSON"),
        (status = 409, description = "Plate already registered"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_moto(
    State(state): State<MotoHandlerState>,
    ValidatedJson(body): ValidatedJson<MotoRequest>,
) -> Result<
    (StatusCode, [(HeaderName, String); 1], Json<ApiResponse<MotoResource>>),
    ApiError<MotoResource>,
> {
    let moto = state.motos.create(body.into()).await.map_err(domain_error)?;
    let location = MotoResource::location(moto.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(moto.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/motos/{id}",
    tag = "Motos",
    params(("id" = Uuid, Path, description = "Moto ID")),
    request_body = MotoRequest,
    responses(
        (status = 200, description = "Moto updated", body = ApiResponse<MotoResource>),
        (status = 404, description = "Moto not found"),
        (status = 409, description = "Plate belongs to another moto"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_moto(
    State(state): State<MotoHandlerState>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<MotoRequest>,
) -> Result<Json<ApiResponse<MotoResource>>, ApiError<MotoResource>> {
    let moto = state
        .motos
        .update(id, body.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(moto.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/motos/{id}",
    tag = "Motos",
    params(("id" = Uuid, Path, description = "Moto ID")),
    responses(
        (status = 200, description = "Moto and its maintenance history deleted"),
        (status = 404, description = "Moto not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_moto(
    State(state): State<MotoHandlerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.motos.delete(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    get,
    path = "/api/v1/motos/{id}/maintenances",
    tag = "Motos",
    params(("id" = Uuid, Path, description = "Moto ID")),
    responses(
        (status = 200, description = "Maintenance history, newest first", body = ApiResponse<Vec<MaintenanceResource>>),
        (status = 404, description = "Moto not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_moto_maintenances(
    State(state): State<MotoHandlerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<MaintenanceResource>>>, ApiError<Vec<MaintenanceResource>>> {
    let history = state
        .maintenances
        .list_for_moto(id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        history.into_iter().map(MaintenanceResource::from).collect(),
    )))
}
