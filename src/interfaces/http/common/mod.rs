//! Shared HTTP building blocks: the response envelope, domain error mapping,
//! lenient query parsing and the validating JSON extractor.

pub mod error;
pub mod query_pairs;
pub mod validated_json;

pub use error::{domain_error, status_for, ApiError};
pub use query_pairs::QueryPairs;
pub use validated_json::ValidatedJson;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response envelope
///
/// Single-resource endpoints return their payload in this envelope.
/// On success: `{"success": true, "data": {...}}`,
/// on error: `{"success": false, "data": null, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload, `null` on error
    pub data: Option<T>,
    /// Error description, omitted on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
