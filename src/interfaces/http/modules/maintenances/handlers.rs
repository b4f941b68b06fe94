//! Maintenance API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use uuid::Uuid;

use super::dto::{ListMaintenancesParams, MaintenanceRequest, MaintenanceResource};
use crate::application::MaintenanceService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct MaintenanceHandlerState {
    pub service: Arc<MaintenanceService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/maintenances",
    tag = "Maintenances",
    params(ListMaintenancesParams),
    responses(
        (status = 200, description = "Maintenance records, newest first", body = ApiResponse<Vec<MaintenanceResource>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_maintenances(
    State(state): State<MaintenanceHandlerState>,
    Query(params): Query<ListMaintenancesParams>,
) -> Result<Json<ApiResponse<Vec<MaintenanceResource>>>, ApiError<Vec<MaintenanceResource>>> {
    let records = state
        .service
        .list(params.moto_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        records.into_iter().map(MaintenanceResource::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/maintenances/{id}",
    tag = "Maintenances",
    params(("id" = Uuid, Path, description = "Maintenance ID")),
    responses(
        (status = 200, description = "Maintenance found", body = ApiResponse<MaintenanceResource>),
        (status = 404, description = "Maintenance not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_maintenance(
    State(state): State<MaintenanceHandlerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MaintenanceResource>>, ApiError<MaintenanceResource>> {
    let record = state.service.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(record.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/maintenances",
    tag = "Maintenances",
    request_body = MaintenanceRequest,
    responses(
        (status = 201, description = "Maintenance recorded", body = ApiResponse<MaintenanceResource>,
         headers(("Location" = String, description = "URI of the new record"))),
        (status = 400, description = "Malformed JSON"),
        (status = 422, description = "Validation error or unknown moto")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_maintenance(
    State(state): State<MaintenanceHandlerState>,
    ValidatedJson(body): ValidatedJson<MaintenanceRequest>,
) -> Result<
    (StatusCode, [(HeaderName, String); 1], Json<ApiResponse<MaintenanceResource>>),
    ApiError<MaintenanceResource>,
> {
    let record = state.service.create(body.into()).await.map_err(domain_error)?;
    let location = MaintenanceResource::location(record.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(record.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/maintenances/{id}",
    tag = "Maintenances",
    params(("id" = Uuid, Path, description = "Maintenance ID")),
    request_body = MaintenanceRequest,
    responses(
        (status = 200, description = "Maintenance updated", body = ApiResponse<MaintenanceResource>),
        (status = 404, description = "Maintenance not found"),
        (status = 422, description = "Validation error or unknown moto")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_maintenance(
    State(state): State<MaintenanceHandlerState>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<MaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceResource>>, ApiError<MaintenanceResource>> {
    let record = state
        .service
        .update(id, body.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(record.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/maintenances/{id}",
    tag = "Maintenances",
    params(("id" = Uuid, Path, description = "Maintenance ID")),
    responses(
        (status = 200, description = "Maintenance deleted"),
        (status = 404, description = "Maintenance not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_maintenance(
    State(state): State<MaintenanceHandlerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.service.delete(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}
