//! JWT claim structure for session tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use coursegate_core::DomainError;
use coursegate_models::{Role, UserId};

/// Claims embedded in a session token.
///
/// Carries enough to authorize a request without a store lookup: the role
/// is the one the user held when the token was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Issued-at, Unix seconds
    pub iat: i64,
    /// Expiry, Unix seconds. The token is rejected once `now >= exp`.
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, DomainError> {
        self.sub.parse().map_err(|_| DomainError::InvalidToken)
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}
