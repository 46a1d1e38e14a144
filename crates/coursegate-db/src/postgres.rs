//! PostgreSQL store.
//!
//! A course is a single row; its modules and classes are one JSONB value.
//! Queries are built at runtime so the crate compiles without a live
//! database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use coursegate_models::{Course, CourseId, Module, NewUser, Role, UserId, UserRecord};

use crate::{CourseStore, StoreError, UserStore};

const USER_COLUMNS: &str = "id, email, name, role, password_hash, created_at, updated_at";
const COURSE_COLUMNS: &str =
    "id, title, slug, description, audience, modules, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects and applies pending migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!(max_connections, "Database connected and migrations applied");

        Ok(Self { pool })
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    role: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserRecord {
            id: UserId::from_uuid(row.id),
            email: row.email,
            name: row.name,
            role: parse_role(&row.role)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    slug: String,
    description: String,
    audience: Vec<String>,
    modules: Json<Vec<Module>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CourseRow> for Course {
    type Error = StoreError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let audience = row
            .audience
            .iter()
            .map(|name| parse_role(name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Course {
            id: CourseId::from_uuid(row.id),
            title: row.title,
            slug: row.slug,
            description: row.description,
            audience,
            modules: row.modules.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn parse_role(name: &str) -> Result<Role, StoreError> {
    name.parse()
        .map_err(|_| StoreError::Corrupt(format!("unknown role `{}`", name)))
}

fn audience_names(audience: &[Role]) -> Vec<String> {
    audience.iter().map(|r| r.as_str().to_string()).collect()
}

/// Maps unique-index violations to [`StoreError::Conflict`].
fn write_error(err: sqlx::Error) -> StoreError {
    let field = match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => match db.constraint() {
            Some(name) if name.contains("slug") => Some("slug"),
            Some(name) if name.contains("email") => Some("email"),
            _ => Some("unknown"),
        },
        _ => None,
    };

    match field {
        Some(field) => StoreError::Conflict { field },
        None => StoreError::Database(err),
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let sql = format!(
            "INSERT INTO users (id, email, name, role, password_hash) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        );

        let row: UserRow = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.email)
            .bind(&user.name)
            .bind(user.role.as_str())
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(write_error)?;

        row.try_into()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRecord::try_from).transpose()
    }
}

#[async_trait]
impl CourseStore for PgStore {
    async fn list_courses_for(&self, role: Role) -> Result<Vec<Course>, StoreError> {
        let sql = format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE $1 = ANY(audience) \
             ORDER BY created_at, id"
        );

        let rows: Vec<CourseRow> = sqlx::query_as(&sql)
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Course::try_from).collect()
    }

    async fn find_course(&self, id_or_slug: &str) -> Result<Option<Course>, StoreError> {
        let id: Option<Uuid> = id_or_slug.parse().ok();

        // An id match wins over a slug match.
        let sql = format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1::uuid OR slug = $2 \
             ORDER BY (id IS NOT DISTINCT FROM $1::uuid) DESC LIMIT 1"
        );

        let row: Option<CourseRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(id_or_slug)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Course::try_from).transpose()
    }

    async fn slug_exists(
        &self,
        slug: &str,
        exclude: Option<CourseId>,
    ) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2::uuid))",
        )
        .bind(slug)
        .bind(exclude.map(CourseId::into_inner))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert_course(&self, course: Course) -> Result<Course, StoreError> {
        let sql = format!(
            "INSERT INTO courses ({COURSE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COURSE_COLUMNS}"
        );

        let row: CourseRow = sqlx::query_as(&sql)
            .bind(course.id.into_inner())
            .bind(&course.title)
            .bind(&course.slug)
            .bind(&course.description)
            .bind(audience_names(&course.audience))
            .bind(Json(&course.modules))
            .bind(course.created_at)
            .bind(course.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(write_error)?;

        row.try_into()
    }

    async fn update_course(&self, course: Course) -> Result<Option<Course>, StoreError> {
        let sql = format!(
            "UPDATE courses SET title = $2, slug = $3, description = $4, audience = $5, \
             modules = $6, updated_at = $7 WHERE id = $1 RETURNING {COURSE_COLUMNS}"
        );

        let row: Option<CourseRow> = sqlx::query_as(&sql)
            .bind(course.id.into_inner())
            .bind(&course.title)
            .bind(&course.slug)
            .bind(&course.description)
            .bind(audience_names(&course.audience))
            .bind(Json(&course.modules))
            .bind(course.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(write_error)?;

        row.map(Course::try_from).transpose()
    }

    async fn delete_course(&self, id: CourseId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
