//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a password using bcrypt with the default cost
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// Hash a password using bcrypt with an explicit cost (4..=31)
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}
