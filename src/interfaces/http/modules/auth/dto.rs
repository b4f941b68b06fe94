//! Authentication DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::User;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    #[serde(alias = "nome")]
    pub name: String,
    #[validate(
        email(message = "invalid email format"),
        length(max = 160, message = "email must be at most 160 characters")
    )]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6-128 characters"))]
    #[serde(alias = "senha")]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[serde(alias = "senha")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public view of a user; never carries the password hash
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
