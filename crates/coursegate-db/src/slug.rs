//! Slug allocation against the course store.
//!
//! [`allocate_slug`] picks the plain slug of a title when no other course
//! holds it, otherwise the first free `<base>-<suffix>` candidate. The check
//! and the following write are not atomic; the store's unique index on
//! `slug` catches the loser of a race and the write helpers here allocate
//! again, up to [`MAX_WRITE_ATTEMPTS`] times, before giving up with
//! [`DomainError::SlugConflict`].

use coursegate_core::slug::{slugify, with_random_suffix};
use coursegate_core::{AppError, DomainError};
use coursegate_models::{Course, CourseId};

use crate::CourseStore;

/// Suffixed candidates tried before allocation gives up.
pub const MAX_CANDIDATES: usize = 32;

/// Writes attempted when a concurrent writer keeps winning the slug.
pub const MAX_WRITE_ATTEMPTS: usize = 3;

/// Returns a slug for `title` that no course other than `exclude` holds.
///
/// On update pass the course's own id as `exclude`, so that a title which
/// slugifies to the course's current slug keeps it.
pub async fn allocate_slug(
    store: &dyn CourseStore,
    title: &str,
    exclude: Option<CourseId>,
) -> Result<String, AppError> {
    let base = slugify(title);
    let mut candidate = base.clone();

    for _ in 0..MAX_CANDIDATES {
        if !store.slug_exists(&candidate, exclude).await? {
            return Ok(candidate);
        }
        candidate = with_random_suffix(&base);
    }

    tracing::warn!(base = %base, "No free slug candidate found");
    Err(DomainError::SlugConflict.into())
}

/// Inserts `course` under a freshly allocated slug.
pub async fn insert_with_unique_slug(
    store: &dyn CourseStore,
    mut course: Course,
) -> Result<Course, AppError> {
    for attempt in 1..=MAX_WRITE_ATTEMPTS {
        course.slug = allocate_slug(store, &course.title, None).await?;

        match store.insert_course(course.clone()).await {
            Ok(saved) => return Ok(saved),
            Err(err) if err.is_conflict_on("slug") => {
                tracing::warn!(attempt, slug = %course.slug, "Slug taken by a concurrent write");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(DomainError::SlugConflict.into())
}

/// Writes an updated course.
///
/// When `title_changed` is false the stored slug is kept as is. Otherwise a
/// slug is allocated for the new title, excluding the course itself.
pub async fn update_with_unique_slug(
    store: &dyn CourseStore,
    mut course: Course,
    title_changed: bool,
) -> Result<Option<Course>, AppError> {
    let attempts = if title_changed { MAX_WRITE_ATTEMPTS } else { 1 };

    for attempt in 1..=attempts {
        if title_changed {
            course.slug = allocate_slug(store, &course.title, Some(course.id)).await?;
        }

        match store.update_course(course.clone()).await {
            Ok(saved) => return Ok(saved),
            Err(err) if err.is_conflict_on("slug") => {
                tracing::warn!(attempt, slug = %course.slug, "Slug taken by a concurrent write");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(DomainError::SlugConflict.into())
}
