//! In-memory store.
//!
//! Used by the test suite and when no `DATABASE_URL` is configured. Data lives
//! for the life of the process. Unique indexes are checked under the write
//! lock, so concurrent inserts race the same way they would against the
//! database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use coursegate_models::{Course, CourseId, NewUser, Role, UserId, UserRecord};

use crate::{CourseStore, StoreError, UserStore};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, UserRecord>,
    /// Insertion order doubles as creation order.
    courses: Vec<Course>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict { field: "email" });
        }

        let now = Utc::now();
        let record = UserRecord {
            id: UserId::new(),
            email: user.email,
            name: user.name,
            role: user.role,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn list_courses_for(&self, role: Role) -> Result<Vec<Course>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .courses
            .iter()
            .filter(|c| c.is_accessible_by(role))
            .cloned()
            .collect())
    }

    async fn find_course(&self, id_or_slug: &str) -> Result<Option<Course>, StoreError> {
        let tables = self.tables.read().await;

        let id = id_or_slug.parse::<CourseId>().ok();

        let by_id = id.and_then(|id| tables.courses.iter().find(|c| c.id == id));
        let found = by_id.or_else(|| tables.courses.iter().find(|c| c.slug == id_or_slug));

        Ok(found.cloned())
    }

    async fn slug_exists(
        &self,
        slug: &str,
        exclude: Option<CourseId>,
    ) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .courses
            .iter()
            .any(|c| c.slug == slug && Some(c.id) != exclude))
    }

    async fn insert_course(&self, course: Course) -> Result<Course, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.courses.iter().any(|c| c.slug == course.slug) {
            return Err(StoreError::Conflict { field: "slug" });
        }

        tables.courses.push(course.clone());
        Ok(course)
    }

    async fn update_course(&self, course: Course) -> Result<Option<Course>, StoreError> {
        let mut tables = self.tables.write().await;

        if tables
            .courses
            .iter()
            .any(|c| c.slug == course.slug && c.id != course.id)
        {
            return Err(StoreError::Conflict { field: "slug" });
        }

        match tables.courses.iter_mut().find(|c| c.id == course.id) {
            Some(slot) => {
                *slot = course.clone();
                Ok(Some(course))
            }
            None => Ok(None),
        }
    }

    async fn delete_course(&self, id: CourseId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.courses.len();
        tables.courses.retain(|c| c.id != id);
        Ok(tables.courses.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Test User".to_string(),
            role: Role::Student,
            password_hash: "$2b$10$notarealhash".to_string(),
        }
    }

    fn course(title: &str, slug: &str, audience: Vec<Role>) -> Course {
        let now = Utc::now();
        Course {
            id: CourseId::new(),
            title: title.to_string(),
            slug: slug.to_string(),
            description: "A course description".to_string(),
            audience,
            modules: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_user_email_is_unique() {
        let store = MemoryStore::new();
        store.insert_user(new_user("a@b.co")).await.unwrap();

        let err = store.insert_user(new_user("a@b.co")).await.unwrap_err();
        assert!(err.is_conflict_on("email"));
    }

    #[tokio::test]
    async fn test_find_user() {
        let store = MemoryStore::new();
        let user = store.insert_user(new_user("a@b.co")).await.unwrap();

        let by_email = store.find_user_by_email("a@b.co").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
        assert!(store.find_user_by_email("x@b.co").await.unwrap().is_none());
        assert!(store.find_user_by_id(user.id).await.unwrap().is_some());
        assert!(store.find_user_by_id(UserId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_course_slug_is_unique() {
        let store = MemoryStore::new();
        store
            .insert_course(course("Intro to UX", "intro-to-ux", vec![Role::Normal]))
            .await
            .unwrap();

        let err = store
            .insert_course(course("Intro to UX", "intro-to-ux", vec![Role::Normal]))
            .await
            .unwrap_err();
        assert!(err.is_conflict_on("slug"));
    }

    #[tokio::test]
    async fn test_find_course_by_id_or_slug() {
        let store = MemoryStore::new();
        let saved = store
            .insert_course(course("Intro to UX", "intro-to-ux", vec![Role::Normal]))
            .await
            .unwrap();

        let by_id = store.find_course(&saved.id.to_string()).await.unwrap();
        let by_slug = store.find_course("intro-to-ux").await.unwrap();
        assert_eq!(by_id.as_ref().map(|c| c.id), Some(saved.id));
        assert_eq!(by_slug.map(|c| c.id), Some(saved.id));
        assert!(store.find_course("missing").await.unwrap().is_none());
        assert!(
            store
                .find_course(&CourseId::new().to_string())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_list_filters_by_audience_in_insertion_order() {
        let store = MemoryStore::new();
        store
            .insert_course(course("First", "first", vec![Role::Student]))
            .await
            .unwrap();
        store
            .insert_course(course("Second", "second", vec![Role::Developer]))
            .await
            .unwrap();
        store
            .insert_course(course("Third", "third", vec![Role::Normal, Role::Student]))
            .await
            .unwrap();

        let titles: Vec<String> = store
            .list_courses_for(Role::Student)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["First", "Third"]);
    }

    #[tokio::test]
    async fn test_slug_exists_excludes_self() {
        let store = MemoryStore::new();
        let saved = store
            .insert_course(course("Data 101", "data-101", vec![Role::Normal]))
            .await
            .unwrap();

        assert!(store.slug_exists("data-101", None).await.unwrap());
        assert!(!store.slug_exists("data-101", Some(saved.id)).await.unwrap());
        assert!(
            store
                .slug_exists("data-101", Some(CourseId::new()))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_update_rejects_slug_held_by_other() {
        let store = MemoryStore::new();
        store
            .insert_course(course("Data 101", "data-101", vec![Role::Normal]))
            .await
            .unwrap();
        let mut other = store
            .insert_course(course("Other", "other", vec![Role::Normal]))
            .await
            .unwrap();

        other.slug = "data-101".to_string();
        let err = store.update_course(other).await.unwrap_err();
        assert!(err.is_conflict_on("slug"));
    }

    #[tokio::test]
    async fn test_update_missing_course_is_none() {
        let store = MemoryStore::new();
        let result = store
            .update_course(course("Ghost", "ghost", vec![Role::Normal]))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_is_not_idempotent() {
        let store = MemoryStore::new();
        let saved = store
            .insert_course(course("Gone", "gone", vec![Role::Normal]))
            .await
            .unwrap();

        assert!(store.delete_course(saved.id).await.unwrap());
        assert!(!store.delete_course(saved.id).await.unwrap());
        assert!(store.find_course("gone").await.unwrap().is_none());
    }
}
