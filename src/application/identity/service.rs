//! Authentication service: registration, login and the current profile.
//!
//! HTTP handlers stay thin and delegate here.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::user::normalize_email;
use crate::domain::{CreateUserDto, DomainError, DomainResult, RepositoryProvider, User};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password_with_cost, verify_password};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: User,
}

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            repos,
            jwt_config,
            bcrypt_cost,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Registration ────────────────────────────────────────────

    pub async fn register(&self, name: &str, email: &str, password: &str) -> DomainResult<User> {
        let name = name.trim();
        let email = normalize_email(email);
        if name.is_empty() {
            return Err(DomainError::Validation("name is required".into()));
        }
        if !email.contains('@') {
            return Err(DomainError::Validation("invalid email address".into()));
        }

        if self.repos.users().get_user_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("email already registered".into()));
        }

        let password_hash = hash_password_with_cost(password, self.bcrypt_cost)
            .map_err(|e| DomainError::Storage(format!("failed to hash password: {}", e)))?;

        let user = self
            .repos
            .users()
            .create_user(CreateUserDto {
                id: Uuid::new_v4(),
                name: name.to_string(),
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "New user registered");
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check credentials and issue a JWT. Unknown emails and wrong passwords
    /// produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let email = normalize_email(email);
        let Some(user) = self.repos.users().get_user_by_email(&email).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or_else(|e| {
            warn!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
            false
        });
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(
            &user.id.to_string(),
            &user.email,
            &user.name,
            &self.jwt_config,
        )
        .map_err(|e| DomainError::Storage(format!("failed to create token: {}", e)))?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn me(&self, user_id: Uuid) -> DomainResult<User> {
        self.repos
            .users()
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))
    }
}
