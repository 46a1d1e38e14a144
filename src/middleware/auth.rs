use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use coursegate_auth::{Claims, verify_token};
use coursegate_config::JwtConfig;
use coursegate_core::{AppError, DomainError};
use coursegate_models::{Role, UserId};

use crate::metrics::track_token_validation;
use crate::state::AppState;

/// The verified identity of the caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn user_id(&self) -> Result<UserId, AppError> {
        Ok(self.0.user_id()?)
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

/// Returns the token of an `Authorization: Bearer <token>` header.
///
/// A missing header, a non-UTF-8 value, another scheme, or an empty token
/// all count as no token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, DomainError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(DomainError::MissingToken)
}

/// Verifies the request's bearer token and returns the caller's identity.
pub fn authenticate_headers(
    headers: &HeaderMap,
    jwt_config: &JwtConfig,
) -> Result<AuthUser, AppError> {
    let token = match bearer_token(headers) {
        Ok(token) => token,
        Err(err) => {
            track_token_validation("missing");
            return Err(err.into());
        }
    };

    match verify_token(token, jwt_config) {
        Ok(claims) => {
            track_token_validation("valid");
            Ok(AuthUser(claims))
        }
        Err(err) => {
            track_token_validation("invalid");
            Err(err)
        }
    }
}

/// Middleware that rejects unauthenticated requests and attaches the
/// [`AuthUser`] to the request extensions for later layers and handlers.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = authenticate_headers(req.headers(), &state.jwt_config)?;
    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        authenticate_headers(&parts.headers, &state.jwt_config)
    }
}
