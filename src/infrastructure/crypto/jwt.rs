//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens (HS256)
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
    /// Audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "dev-secret-change-me-please-32-bytes!".to_string(),
            expiration_hours: 8,
            issuer: "mottu-api".to_string(),
            audience: "mottu-api-clients".to_string(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

/// JWT TokenClaims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

impl TokenClaims {
    pub fn new(user_id: &str, email: &str, name: &str, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
        }
    }
}

/// Create a JWT token for a user
pub fn create_token(
    user_id: &str,
    email: &str,
    name: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let token_claims = TokenClaims::new(user_id, email, name, config);

    encode(
        &Header::default(),
        &token_claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a JWT token (signature, expiry, issuer and audience)
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}
