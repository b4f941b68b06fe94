//! User domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// API user. Users carry no roles: any authenticated user may use every route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Trimmed and lower-cased
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Normalise an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Demo@Mottu.COM "), "demo@mottu.com");
    }
}
