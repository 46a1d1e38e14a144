use axum::body::Body;
use axum::extract::Request as AxumRequest;
use axum::middleware::Next;
use axum::http::{Request, StatusCode, header};
use axum::routing::get;
use axum::{Router, middleware};
use tower::ServiceExt;

use coursegate::coursegate_auth::{Claims, issue_token};
use coursegate::coursegate_config::{CorsConfig, JwtConfig};
use coursegate::coursegate_models::{Role, UserId};
use coursegate::middleware::auth::{AuthUser, authenticate};
use coursegate::middleware::role::{authorize, check_any_role, require_roles};
use coursegate::state::AppState;

fn create_test_auth_user(role: Role) -> AuthUser {
    AuthUser(Claims {
        sub: "00000000-0000-0000-0000-000000000000".to_string(),
        email: "test@example.com".to_string(),
        role,
        exp: 9_999_999_999,
        iat: 1_234_567_890,
    })
}

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "role-middleware-secret".to_string(),
        token_ttl_secs: 600,
    }
}

/// A route that only social managers and developers may reach.
fn guarded_app() -> Router {
    let state = AppState::in_memory(jwt_config(), CorsConfig::from_origins(""));

    Router::new()
        .route("/reports", get(|| async { "ok" }))
        .route_layer(middleware::from_fn(|req: AxumRequest, next: Next| {
            require_roles(req, next, vec![Role::SocialManager, Role::Developer])
        }))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state)
}

async fn get_reports(token: Option<String>) -> StatusCode {
    let mut builder = Request::builder().uri("/reports");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let response = guarded_app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    response.status()
}

#[test]
fn test_check_any_role_multiple_match() {
    let allowed = [Role::Student, Role::SocialManager];

    assert!(check_any_role(&create_test_auth_user(Role::Student), &allowed).is_ok());
    assert!(check_any_role(&create_test_auth_user(Role::SocialManager), &allowed).is_ok());
    assert!(check_any_role(&create_test_auth_user(Role::Normal), &allowed).is_err());
    assert!(check_any_role(&create_test_auth_user(Role::Developer), &allowed).is_err());
}

#[test]
fn test_authorize_empty_set_never_rejects() {
    for role in Role::ALL {
        assert!(authorize(Some(&create_test_auth_user(role)), &[]).is_ok());
    }
}

#[test]
fn test_authorize_developer_only_rejects_student() {
    let err = authorize(Some(&create_test_auth_user(Role::Student)), &[Role::Developer])
        .unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_require_roles_layer() {
    let token = |role| Some(issue_token(UserId::new(), "x@test.com", role, &jwt_config()).unwrap());

    assert_eq!(get_reports(None).await, StatusCode::UNAUTHORIZED);
    assert_eq!(get_reports(token(Role::Student)).await, StatusCode::FORBIDDEN);
    assert_eq!(get_reports(token(Role::Normal)).await, StatusCode::FORBIDDEN);
    assert_eq!(get_reports(token(Role::SocialManager)).await, StatusCode::OK);
    assert_eq!(get_reports(token(Role::Developer)).await, StatusCode::OK);
}
