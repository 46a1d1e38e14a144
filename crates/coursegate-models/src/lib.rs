//! # Coursegate Models
//!
//! Domain models and DTOs for the Coursegate API.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed identifiers
//! - [`roles`]: The fixed role enum shared by users and course audiences
//! - [`users`]: Accounts, credentials, and auth request/response DTOs
//! - [`courses`]: Courses with their embedded modules and classes, plus DTOs
//!
//! Nothing in this crate knows how records are stored; see `coursegate-db`.

pub mod courses;
pub mod ids;
pub mod roles;
pub mod users;

pub use courses::{
    Class, Course, CourseDetailResponse, CourseListParams, CourseListResponse, CourseSort,
    CourseSummary, CreateCourseDto, Module, UpdateCourseDto, normalize_audience,
};
pub use ids::{CourseId, UserId};
pub use roles::Role;
pub use users::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User, UserRecord};
