//! Password hashing backed by bcrypt.
//!
//! Digests are salted per call, so hashing the same password twice yields
//! different strings. Comparison is delegated to [`bcrypt::verify`], which
//! compares digests in constant time.

use std::sync::OnceLock;

use crate::errors::AppError;

/// bcrypt work factor for stored credentials.
pub const PASSWORD_HASH_COST: u32 = 10;

static PLACEHOLDER_HASH: OnceLock<Option<String>> = OnceLock::new();

pub fn hash_password(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, PASSWORD_HASH_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    bcrypt::verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

/// Runs one full verification against a throwaway digest.
///
/// Login calls this when the email is unknown so that both failure paths
/// spend the same bcrypt time. The result is always `false`.
pub fn verify_against_placeholder(password: &str) -> bool {
    let placeholder = PLACEHOLDER_HASH
        .get_or_init(|| bcrypt::hash("placeholder-credential", PASSWORD_HASH_COST).ok());

    if let Some(hash) = placeholder {
        let _ = bcrypt::verify(password, hash);
    }

    false
}
