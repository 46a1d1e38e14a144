use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{login, me, register};
use crate::middleware::auth::authenticate;
use crate::state::AppState;

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
}
