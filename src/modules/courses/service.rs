use anyhow::anyhow;
use chrono::Utc;
use tracing::instrument;

use coursegate_core::slug::slugify;
use coursegate_core::{AppError, DomainError};
use coursegate_db::CourseStore;
use coursegate_db::slug::{insert_with_unique_slug, update_with_unique_slug};
use coursegate_models::{
    Course, CourseId, CourseListParams, CourseListResponse, CreateCourseDto, Role,
    UpdateCourseDto, normalize_audience,
};

use crate::metrics::{track_course_mutation, track_slug_suffixed};

const COURSE_NOT_FOUND: &str = "Course not found";

pub struct CourseService;

impl CourseService {
    /// Courses visible to `role`, with the requested view options applied
    /// after the audience filter.
    #[instrument(skip(store))]
    pub async fn list_for_role(
        store: &dyn CourseStore,
        role: Role,
        params: &CourseListParams,
    ) -> Result<CourseListResponse, AppError> {
        let visible = store.list_courses_for(role).await?;
        let (courses, meta) = params.apply(visible);
        Ok(CourseListResponse { courses, meta })
    }

    /// Looks up a course by id or slug on behalf of `role`.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFoundOrForbidden`] both when nothing matches and
    /// when the course's audience excludes `role`.
    #[instrument(skip(store))]
    pub async fn get_for_role(
        store: &dyn CourseStore,
        role: Role,
        id_or_slug: &str,
    ) -> Result<Course, AppError> {
        store
            .find_course(id_or_slug)
            .await?
            .filter(|course| course.is_accessible_by(role))
            .ok_or_else(|| DomainError::NotFoundOrForbidden.into())
    }

    #[instrument(skip(store, dto), fields(title = %dto.title))]
    pub async fn create(store: &dyn CourseStore, dto: CreateCourseDto) -> Result<Course, AppError> {
        let now = Utc::now();
        let course = Course {
            id: CourseId::new(),
            title: dto.title.trim().to_string(),
            slug: String::new(),
            description: dto.description.trim().to_string(),
            audience: normalize_audience(dto.audience),
            modules: dto.modules,
            created_at: now,
            updated_at: now,
        };

        let saved = insert_with_unique_slug(store, course).await?;
        note_suffixed_slug(&saved);
        track_course_mutation("create");
        tracing::info!(course_id = %saved.id, slug = %saved.slug, "Course created");

        Ok(saved)
    }

    /// Applies a partial update. The slug is recomputed only when the title
    /// actually changes. An empty update returns the course without writing.
    #[instrument(skip(store, dto))]
    pub async fn update(
        store: &dyn CourseStore,
        id_or_slug: &str,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let mut course = Self::find_for_write(store, id_or_slug).await?;
        if dto.is_empty() {
            return Ok(course);
        }

        let mut title_changed = false;
        if let Some(title) = dto.title {
            let title = title.trim().to_string();
            title_changed = title != course.title;
            course.title = title;
        }
        if let Some(description) = dto.description {
            course.description = description.trim().to_string();
        }
        if let Some(audience) = dto.audience {
            course.audience = normalize_audience(Some(audience));
        }
        if let Some(modules) = dto.modules {
            course.modules = modules;
        }
        course.updated_at = Utc::now();

        let saved = update_with_unique_slug(store, course, title_changed)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(COURSE_NOT_FOUND)))?;

        if title_changed {
            note_suffixed_slug(&saved);
        }
        track_course_mutation("update");
        tracing::info!(course_id = %saved.id, slug = %saved.slug, "Course updated");

        Ok(saved)
    }

    #[instrument(skip(store))]
    pub async fn delete(store: &dyn CourseStore, id_or_slug: &str) -> Result<(), AppError> {
        let course = Self::find_for_write(store, id_or_slug).await?;

        if !store.delete_course(course.id).await? {
            return Err(AppError::not_found(anyhow!(COURSE_NOT_FOUND)));
        }

        track_course_mutation("delete");
        tracing::info!(course_id = %course.id, "Course deleted");
        Ok(())
    }

    /// Writers manage the whole catalog, so no audience filter applies here.
    async fn find_for_write(store: &dyn CourseStore, id_or_slug: &str) -> Result<Course, AppError> {
        store
            .find_course(id_or_slug)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(COURSE_NOT_FOUND)))
    }
}

fn note_suffixed_slug(course: &Course) {
    let base = slugify(&course.title);
    if course.slug != base && course.slug.starts_with(&base) {
        track_slug_suffixed();
    }
}
