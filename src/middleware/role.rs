//! Role-based authorization.
//!
//! Authorization runs after [`authenticate`](crate::middleware::auth::authenticate)
//! and reads the identity it attached to the request. It never looks at the
//! `Authorization` header itself.
//!
//! - An empty allowed set is no restriction and always passes.
//! - Otherwise a request without an identity fails with
//!   [`DomainError::Unauthenticated`], and one whose role is not in the set
//!   fails with [`DomainError::Forbidden`].

use axum::{extract::Request, middleware::Next, response::Response};

use coursegate_core::{AppError, DomainError};
use coursegate_models::Role;

use crate::metrics::track_authorization_check;
use crate::middleware::auth::AuthUser;

/// Checks that `auth_user` holds one of `allowed_roles`.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn handler(auth_user: AuthUser) -> Result<Json<Response>, AppError> {
///     check_any_role(&auth_user, &[Role::Developer])?;
///     // Handler logic
/// }
/// ```
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[Role]) -> Result<(), AppError> {
    if allowed_roles.is_empty() {
        return Ok(());
    }

    let role = auth_user.role();
    let allowed = allowed_roles.contains(&role);
    track_authorization_check(allowed, role.as_str());

    if !allowed {
        let required = allowed_roles
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(DomainError::forbidden(format!(
            "Access denied. Required roles: {}",
            required
        ))
        .into());
    }

    Ok(())
}

/// The authorization decision for an optional identity.
pub fn authorize(identity: Option<&AuthUser>, allowed_roles: &[Role]) -> Result<(), AppError> {
    if allowed_roles.is_empty() {
        return Ok(());
    }

    let auth_user = identity.ok_or(DomainError::Unauthenticated)?;
    check_any_role(auth_user, allowed_roles)
}

/// Middleware admitting only callers whose role is in `allowed_roles`.
///
/// # Usage with axum::middleware::from_fn
///
/// ```rust,ignore
/// let routes = Router::new()
///     .route("/reports", get(reports_handler))
///     .route_layer(middleware::from_fn(|req, next| {
///         require_roles(req, next, vec![Role::Developer, Role::SocialManager])
///     }))
///     .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));
/// ```
pub async fn require_roles(
    req: Request,
    next: Next,
    allowed_roles: Vec<Role>,
) -> Result<Response, AppError> {
    authorize(req.extensions().get::<AuthUser>(), &allowed_roles)?;
    Ok(next.run(req).await)
}

/// Middleware for catalog management routes.
pub async fn require_catalog_manager(req: Request, next: Next) -> Result<Response, AppError> {
    require_roles(req, next, Role::CATALOG_MANAGERS.to_vec()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursegate_auth::Claims;

    fn auth_user(role: Role) -> AuthUser {
        AuthUser(Claims {
            sub: "00000000-0000-0000-0000-000000000000".to_string(),
            email: "test@example.com".to_string(),
            role,
            iat: 1_234_567_890,
            exp: 9_999_999_999,
        })
    }

    #[test]
    fn test_empty_set_never_rejects() {
        for role in Role::ALL {
            assert!(authorize(Some(&auth_user(role)), &[]).is_ok());
        }
        assert!(authorize(None, &[]).is_ok());
    }

    #[test]
    fn test_missing_identity_is_unauthenticated() {
        let err = authorize(None, &[Role::Developer]).unwrap_err();
        assert_eq!(err.domain(), Some(&DomainError::Unauthenticated));
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_student_is_forbidden_from_developer_routes() {
        let err = authorize(Some(&auth_user(Role::Student)), &[Role::Developer]).unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
        assert!(err.error.to_string().contains("developer"));
    }

    #[test]
    fn test_member_role_passes() {
        assert!(authorize(Some(&auth_user(Role::Developer)), &[Role::Developer]).is_ok());
        assert!(
            check_any_role(
                &auth_user(Role::SocialManager),
                &[Role::Student, Role::SocialManager]
            )
            .is_ok()
        );
    }
}
