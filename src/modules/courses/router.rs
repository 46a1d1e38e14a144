use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use super::controller::{create_course, delete_course, get_course, list_courses, update_course};
use crate::middleware::auth::authenticate;
use crate::middleware::role::require_catalog_manager;
use crate::state::AppState;

pub fn init_courses_router(state: AppState) -> Router<AppState> {
    let manage = Router::new()
        .route("/", post(create_course))
        .route(
            "/{id_or_slug}",
            patch(update_course)
                .put(update_course)
                .delete(delete_course),
        )
        .route_layer(middleware::from_fn(require_catalog_manager));

    let read = Router::new()
        .route("/", get(list_courses))
        .route("/{id_or_slug}", get(get_course));

    read.merge(manage)
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
