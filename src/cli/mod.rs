//! Administrative commands behind the `coursegate-cli` binary.

pub mod seeder;

use coursegate_core::{AppError, DomainError};
use coursegate_db::UserStore;
use coursegate_models::{Role, UserRecord};

use crate::modules::users::UserService;

/// Creates a developer account. This is the only way to obtain the
/// privileged role; registration refuses it.
pub async fn create_developer(
    store: &dyn UserStore,
    name: &str,
    email: &str,
    password: &str,
) -> Result<UserRecord, AppError> {
    if name.trim().chars().count() < 2 {
        return Err(DomainError::validation("Name must be at least 2 characters").into());
    }
    if password.chars().count() < 8 {
        return Err(DomainError::validation("Password must be at least 8 characters").into());
    }

    UserService::create(store, email, name, Role::Developer, password).await
}
