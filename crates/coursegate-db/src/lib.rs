//! # Coursegate DB
//!
//! The document store behind the API.
//!
//! Handlers and the admin CLI talk to storage through two object-safe traits,
//! [`UserStore`] and [`CourseStore`]. Two backends implement both:
//!
//! - [`PgStore`]: PostgreSQL, with course modules kept as a JSONB document
//! - [`MemoryStore`]: process-local maps, for tests and database-less runs
//!
//! Both enforce the same unique indexes (user email, course slug) and report
//! a violation as [`StoreError::Conflict`]. The [`slug`] module builds the
//! collision-resolving allocator on top of [`CourseStore`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use coursegate_db::{CourseStore, MemoryStore, PgStore};
//!
//! let store: Arc<dyn CourseStore> = match std::env::var("DATABASE_URL") {
//!     Ok(url) => Arc::new(PgStore::connect(&url, 10).await?),
//!     Err(_) => Arc::new(MemoryStore::new()),
//! };
//! ```

use async_trait::async_trait;

use coursegate_models::{Course, CourseId, NewUser, Role, UserId, UserRecord};

pub mod memory;
pub mod postgres;
pub mod slug;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique index rejected the write. `field` is `"email"` or `"slug"`.
    #[error("duplicate value for unique field `{field}`")]
    Conflict { field: &'static str },
    /// A stored row could not be mapped back to a model.
    #[error("corrupt record: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn is_conflict_on(&self, name: &str) -> bool {
        matches!(self, StoreError::Conflict { field } if *field == name)
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts an account. `user.email` must already be normalized.
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError>;
}

#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Courses whose audience contains `role`, oldest first.
    async fn list_courses_for(&self, role: Role) -> Result<Vec<Course>, StoreError>;

    /// Looks a course up by canonical id or, failing that, by slug.
    async fn find_course(&self, id_or_slug: &str) -> Result<Option<Course>, StoreError>;

    /// Whether any course other than `exclude` holds `slug`.
    async fn slug_exists(&self, slug: &str, exclude: Option<CourseId>)
    -> Result<bool, StoreError>;

    async fn insert_course(&self, course: Course) -> Result<Course, StoreError>;

    /// Replaces the stored course with the same id. `None` if it is gone.
    async fn update_course(&self, course: Course) -> Result<Option<Course>, StoreError>;

    /// Returns whether a course was removed.
    async fn delete_course(&self, id: CourseId) -> Result<bool, StoreError>;
}
