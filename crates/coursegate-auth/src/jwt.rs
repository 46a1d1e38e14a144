//! Issuing and verifying session tokens.
//!
//! Tokens are HS256 JWTs signed with [`JwtConfig::secret`]. Expiry is checked
//! here rather than by `jsonwebtoken`, whose default validation allows 60
//! seconds of leeway. A token whose `exp` equals the current second is
//! already expired.
//!
//! The `_at` variants take the clock as an argument so expiry can be tested
//! without sleeping.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use coursegate_config::JwtConfig;
use coursegate_core::{AppError, DomainError};
use coursegate_models::{Role, UserId};

use crate::claims::Claims;

/// Issues a session token for `user_id` that expires after
/// [`JwtConfig::token_ttl_secs`].
pub fn issue_token(
    user_id: UserId,
    email: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    issue_token_at(user_id, email, role, jwt_config, Utc::now().timestamp())
}

/// Issues a session token as if the current time were `now` (Unix seconds).
pub fn issue_token_at(
    user_id: UserId,
    email: &str,
    role: Role,
    jwt_config: &JwtConfig,
    now: i64,
) -> Result<String, AppError> {
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        iat: now,
        exp: now + jwt_config.token_ttl_secs,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies a token's signature and expiry and returns its claims.
///
/// # Errors
///
/// [`DomainError::InvalidToken`] for a bad signature, a malformed token, or
/// an expired one. The caller cannot tell which.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    verify_token_at(token, jwt_config, Utc::now().timestamp())
}

/// Verifies a token as if the current time were `now` (Unix seconds).
pub fn verify_token_at(token: &str, jwt_config: &JwtConfig, now: i64) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.validate_exp = false;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| DomainError::InvalidToken)?;

    if claims.is_expired_at(now) {
        return Err(DomainError::InvalidToken.into());
    }

    Ok(claims)
}
