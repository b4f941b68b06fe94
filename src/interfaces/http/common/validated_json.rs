//! JSON body extractor that also runs `validator` rules.
//!
//! A body that does not parse is a 400. A body that parses but breaks a
//! rule (plate length, model year window, negative cost) is a 422 whose
//! `error` lists every broken rule in a stable order.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiResponse;

/// Key under which `validator` files struct-level `schema` failures.
const SCHEMA_KEY: &str = "__all__";

/// `Json<T>` plus `T::validate()`.
///
/// ```ignore
/// async fn create_moto(ValidatedJson(body): ValidatedJson<MotoRequest>) { /* plate and year already checked */ }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum BodyRejection {
    Malformed(JsonRejection),
    Invalid(ValidationErrors),
}

/// One `field: message` entry per broken field rule, bare messages for
/// struct-level rules, sorted and joined with `; `.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut entries: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let text = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                if field == SCHEMA_KEY {
                    text
                } else {
                    format!("{}: {}", field, text)
                }
            })
        })
        .collect();
    entries.sort();

    if entries.is_empty() {
        "Validation failed".to_string()
    } else {
        entries.join("; ")
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Malformed(rejection) => {
                (StatusCode::BAD_REQUEST, format!("Invalid JSON: {}", rejection))
            }
            Self::Invalid(errors) => (StatusCode::UNPROCESSABLE_ENTITY, validation_message(&errors)),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(BodyRejection::Malformed)?;
        value.validate().map_err(BodyRejection::Invalid)?;
        Ok(ValidatedJson(value))
    }
}
