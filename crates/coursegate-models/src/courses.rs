//! Course catalog models.
//!
//! A [`Course`] owns an ordered list of [`Module`]s, each owning an ordered
//! list of [`Class`]es. Modules and classes have no identity of their own;
//! they are stored embedded in the course document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use coursegate_core::PaginationMeta;
use coursegate_core::PaginationParams;
use coursegate_core::errors::format_validation_errors;
use coursegate_core::serde::deserialize_optional_trimmed;

use crate::ids::CourseId;
use crate::roles::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub slug: String,
    pub description: String,
    /// Roles allowed to see this course. Sorted, no duplicates.
    pub audience: Vec<Role>,
    pub modules: Vec<Module>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn is_accessible_by(&self, role: Role) -> bool {
        self.audience.contains(&role)
    }

    pub fn summary(&self) -> CourseSummary {
        let classes = self.modules.iter().flat_map(|m| m.classes.iter());

        CourseSummary {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            audience: self.audience.clone(),
            module_count: self.modules.len(),
            class_count: classes.clone().count(),
            total_duration: classes.map(|c| c.duration).sum(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Module {
    #[validate(length(min = 3, max = 100, message = "module title must be between 3 and 100 characters"))]
    pub title: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_classes"))]
    pub classes: Vec<Class>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Class {
    #[validate(length(min = 3, max = 100, message = "class title must be between 3 and 100 characters"))]
    pub title: String,
    /// Length in minutes.
    #[validate(range(min = 1, max = 480, message = "class duration must be between 1 and 480 minutes"))]
    pub duration: u32,
    #[serde(
        default,
        alias = "recordingUrl",
        deserialize_with = "deserialize_optional_trimmed",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(url(message = "recording_url must be a valid URL"))]
    pub recording_url: Option<String>,
}

/// Course listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CourseSummary {
    pub id: CourseId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub audience: Vec<Role>,
    pub module_count: usize,
    pub class_count: usize,
    /// Sum of class durations in minutes.
    pub total_duration: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(custom(function = "validate_course_title"))]
    pub title: String,
    #[validate(custom(function = "validate_course_description"))]
    pub description: String,
    /// Defaults to `["normal"]` when omitted.
    #[validate(length(min = 1, message = "audience must contain at least one role"))]
    pub audience: Option<Vec<Role>>,
    #[serde(default)]
    #[validate(custom(function = "validate_modules"))]
    pub modules: Vec<Module>,
}

/// Partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(custom(function = "validate_course_title"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_course_description"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "audience must contain at least one role"))]
    pub audience: Option<Vec<Role>>,
    #[validate(custom(function = "validate_modules"))]
    pub modules: Option<Vec<Module>>,
}

impl UpdateCourseDto {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.audience.is_none()
            && self.modules.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
pub enum CourseSort {
    #[default]
    #[serde(rename = "created_at")]
    CreatedAtAsc,
    #[serde(rename = "-created_at")]
    CreatedAtDesc,
    #[serde(rename = "title")]
    TitleAsc,
    #[serde(rename = "-title")]
    TitleDesc,
}

/// View options applied after the audience filter.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseListParams {
    /// Case-insensitive substring match on title or description.
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub search: Option<String>,
    /// `created_at` (default), `-created_at`, `title`, or `-title`.
    #[serde(default)]
    pub sort: Option<CourseSort>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl CourseListParams {
    /// Applies search, sort, and pagination to an audience-filtered list.
    pub fn apply(&self, mut courses: Vec<Course>) -> (Vec<CourseSummary>, PaginationMeta) {
        if let Some(needle) = self.search.as_deref().map(str::to_lowercase) {
            courses.retain(|course| {
                course.title.to_lowercase().contains(&needle)
                    || course.description.to_lowercase().contains(&needle)
            });
        }

        match self.sort.unwrap_or_default() {
            CourseSort::CreatedAtAsc => courses.sort_by_key(|c| c.created_at),
            CourseSort::CreatedAtDesc => {
                courses.sort_by_key(|c| std::cmp::Reverse(c.created_at))
            }
            CourseSort::TitleAsc => courses.sort_by_key(|c| c.title.to_lowercase()),
            CourseSort::TitleDesc => {
                courses.sort_by_key(|c| std::cmp::Reverse(c.title.to_lowercase()))
            }
        }

        let (page, meta) = self.pagination.paginate(courses);
        (page.iter().map(Course::summary).collect(), meta)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseListResponse {
    pub courses: Vec<CourseSummary>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseDetailResponse {
    pub course: Course,
}

/// Sorts and de-duplicates an audience into set form.
pub fn normalize_audience(audience: Option<Vec<Role>>) -> Vec<Role> {
    let mut audience = audience.unwrap_or_else(|| vec![Role::Normal]);
    audience.sort();
    audience.dedup();
    audience
}

/// Title and description are stored trimmed, so their bounds apply to the trimmed text.
fn validate_course_title(title: &str) -> Result<(), ValidationError> {
    trimmed_length(title, 3, 100, "title must be between 3 and 100 characters")
}

fn validate_course_description(description: &str) -> Result<(), ValidationError> {
    trimmed_length(
        description,
        10,
        1000,
        "description must be between 10 and 1000 characters",
    )
}

fn trimmed_length(
    value: &str,
    min: usize,
    max: usize,
    message: &'static str,
) -> Result<(), ValidationError> {
    let length = value.trim().chars().count();
    if (min..=max).contains(&length) {
        Ok(())
    } else {
        Err(ValidationError::new("length").with_message(message.into()))
    }
}

fn validate_modules(modules: &[Module]) -> Result<(), ValidationError> {
    for (index, module) in modules.iter().enumerate() {
        if let Err(errors) = module.validate() {
            return Err(ValidationError::new("invalid_module").with_message(
                format!("modules[{}]: {}", index, format_validation_errors(&errors)).into(),
            ));
        }
    }
    Ok(())
}

fn validate_classes(classes: &[Class]) -> Result<(), ValidationError> {
    for (index, class) in classes.iter().enumerate() {
        if let Err(errors) = class.validate() {
            return Err(ValidationError::new("invalid_class").with_message(
                format!("classes[{}]: {}", index, format_validation_errors(&errors)).into(),
            ));
        }
    }
    Ok(())
}
