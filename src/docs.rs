use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use coursegate_core::{PaginationMeta, PaginationParams};
use coursegate_models::{
    AuthResponse, Class, Course, CourseDetailResponse, CourseListParams, CourseListResponse,
    CourseSort, CourseSummary, CreateCourseDto, LoginRequest, Module, RegisterRequest, Role,
    UpdateCourseDto, User,
};

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message. Generic for server errors.
    pub error: String,
    /// Stable machine-readable tag, e.g. `invalid_credentials`.
    pub code: String,
    /// Present and `true` when repeating the request may succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::me,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
    ),
    components(
        schemas(
            User,
            Role,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            Course,
            Module,
            Class,
            CourseSummary,
            CourseSort,
            CourseListParams,
            CourseListResponse,
            CourseDetailResponse,
            CreateCourseDto,
            UpdateCourseDto,
            PaginationMeta,
            PaginationParams,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the current account"),
        (name = "Courses", description = "Role-filtered course catalog")
    ),
    info(
        title = "Coursegate API",
        version = "0.1.0",
        description = "Role-gated course catalog with JWT sessions.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
