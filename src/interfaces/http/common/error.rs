//! Mapping of [`DomainError`] onto HTTP responses

use axum::http::StatusCode;
use axum::Json;
use tracing::error;

use super::ApiResponse;
use crate::domain::DomainError;

/// Error half of every handler result
pub type ApiError<T = ()> = (StatusCode, Json<ApiResponse<T>>);

pub fn status_for(e: &DomainError) -> StatusCode {
    match e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a domain error into the enveloped error response.
/// Storage failures are logged and their details kept out of the body.
pub fn domain_error<T>(e: DomainError) -> ApiError<T> {
    let status = status_for(&e);
    let message = match &e {
        DomainError::Storage(detail) => {
            error!(error = %detail, "Storage failure while handling request");
            "Internal server error".to_string()
        }
        DomainError::Unauthorized(msg) => msg.clone(),
        other => other.to_string(),
    };
    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_its_status() {
        let cases = [
            (DomainError::not_found("Moto", "id", 1), StatusCode::NOT_FOUND),
            (DomainError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::Conflict("x".into()), StatusCode::CONFLICT),
            (DomainError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Unprocessable("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(status_for(&err), status);
        }
    }

    #[test]
    fn storage_details_are_hidden() {
        let (status, Json(body)) =
            domain_error::<()>(DomainError::Storage("disk I/O error at /var/db".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }

    #[test]
    fn unauthorized_message_is_passed_through() {
        let (_, Json(body)) =
            domain_error::<()>(DomainError::Unauthorized("Invalid credentials".into()));
        assert_eq!(body.error.as_deref(), Some("Invalid credentials"));
    }
}
