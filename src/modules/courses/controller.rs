use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use coursegate_core::AppError;
use coursegate_models::{
    CourseDetailResponse, CourseListParams, CourseListResponse, CreateCourseDto, UpdateCourseDto,
};

use super::service::CourseService;
use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List the courses whose audience includes the caller's role
#[utoipa::path(
    get,
    path = "/v1/api/courses",
    params(CourseListParams),
    responses(
        (status = 200, description = "Visible courses", body = CourseListResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, auth_user), fields(role = %auth_user.role()))]
pub async fn list_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<CourseListParams>,
) -> Result<Json<CourseListResponse>, AppError> {
    let response =
        CourseService::list_for_role(state.courses.as_ref(), auth_user.role(), &params).await?;
    Ok(Json(response))
}

/// Get a course by id or slug
#[utoipa::path(
    get,
    path = "/v1/api/courses/{id_or_slug}",
    params(("id_or_slug" = String, Path, description = "Course id or slug")),
    responses(
        (status = 200, description = "Course with its modules and classes", body = CourseDetailResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 404, description = "Course not found or inaccessible", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, auth_user), fields(role = %auth_user.role()))]
pub async fn get_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id_or_slug): Path<String>,
) -> Result<Json<CourseDetailResponse>, AppError> {
    let course =
        CourseService::get_for_role(state.courses.as_ref(), auth_user.role(), &id_or_slug).await?;
    Ok(Json(CourseDetailResponse { course }))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/v1/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = CourseDetailResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Role cannot manage the catalog", body = ErrorResponse),
        (status = 409, description = "Slug taken by a concurrent write, retry", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<CourseDetailResponse>), AppError> {
    let course = CourseService::create(state.courses.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(CourseDetailResponse { course })))
}

/// Update a course; absent fields are left unchanged
#[utoipa::path(
    patch,
    path = "/v1/api/courses/{id_or_slug}",
    params(("id_or_slug" = String, Path, description = "Course id or slug")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = CourseDetailResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Role cannot manage the catalog", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Slug taken by a concurrent write, retry", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id_or_slug): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<CourseDetailResponse>, AppError> {
    let course = CourseService::update(state.courses.as_ref(), &id_or_slug, dto).await?;
    Ok(Json(CourseDetailResponse { course }))
}

/// Delete a course
#[utoipa::path(
    delete,
    path = "/v1/api/courses/{id_or_slug}",
    params(("id_or_slug" = String, Path, description = "Course id or slug")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Role cannot manage the catalog", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id_or_slug): Path<String>,
) -> Result<StatusCode, AppError> {
    CourseService::delete(state.courses.as_ref(), &id_or_slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
