//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use crate::application::AuthService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct AuthHandlerState {
    pub service: Arc<AuthService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserInfo>),
        (status = 400, description = "Malformed JSON"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), ApiError<UserInfo>> {
    let user = state
        .service
        .register(&request.name, &request.email, &request.password)
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserInfo::from(user))),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError<LoginResponse>> {
    let auth = state
        .service
        .login(&request.email, &request.password)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token: auth.token,
        token_type: auth.token_type,
        expires_in: auth.expires_in,
        user: auth.user.into(),
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserInfo>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User no longer exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn me(
    State(state): State<AuthHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError<UserInfo>> {
    let user = state.service.me(user.user_id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(user.into())))
}
