//! Bearer token authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use super::common::ApiResponse;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
}

/// State for the authentication layer
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Caller identity taken from a verified token, inserted into request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        let user_id = Uuid::parse_str(&claims.sub).ok()?;
        Some(Self {
            user_id,
            email: claims.email,
            name: claims.name,
        })
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Rejects requests without a valid `Authorization: Bearer <jwt>` header
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => claims,
        Err(e) => {
            return match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    auth_error_response(AuthError::ExpiredToken)
                }
                _ => auth_error_response(AuthError::InvalidToken),
            };
        }
    };

    match AuthenticatedUser::from_claims(claims) {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => auth_error_response(AuthError::InvalidToken),
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let message = match error {
        AuthError::MissingToken => "Missing authentication token",
        AuthError::InvalidToken => "Invalid authentication token",
        AuthError::ExpiredToken => "Token has expired",
    };

    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(message)),
    )
        .into_response()
}
