use std::time::Instant;

use tracing::instrument;
use validator::ValidateEmail;

use coursegate_core::password::{hash_password, verify_against_placeholder, verify_password};
use coursegate_core::{AppError, DomainError};
use coursegate_db::UserStore;
use coursegate_models::users::normalize_email;
use coursegate_models::{NewUser, Role, UserId, UserRecord};

use crate::metrics::track_password_hash_duration;

pub struct UserService;

impl UserService {
    /// Creates an account with a bcrypt digest of `password`.
    ///
    /// The email is normalized before the duplicate check, so addresses that
    /// differ only by case or surrounding whitespace are the same account.
    #[instrument(skip(store, password, name))]
    pub async fn create(
        store: &dyn UserStore,
        email: &str,
        name: &str,
        role: Role,
        password: &str,
    ) -> Result<UserRecord, AppError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(DomainError::validation("Email is required").into());
        }
        if !email.validate_email() {
            return Err(DomainError::validation("Invalid email address").into());
        }

        if store.find_user_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailConflict.into());
        }

        let password_hash = hash_off_thread(password).await?;

        let new_user = NewUser {
            email,
            name: name.trim().to_string(),
            role,
            password_hash,
        };

        match store.insert_user(new_user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "Account created");
                Ok(user)
            }
            // Lost a race with a concurrent registration for the same email.
            Err(err) if err.is_conflict_on("email") => Err(DomainError::EmailConflict.into()),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the account for `email` if `password` matches its digest.
    ///
    /// Unknown email and wrong password both fail with
    /// [`DomainError::InvalidCredentials`], after the same amount of bcrypt
    /// work.
    #[instrument(skip(store, password))]
    pub async fn verify_credentials(
        store: &dyn UserStore,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, AppError> {
        let email = normalize_email(email);
        let user = store.find_user_by_email(&email).await?;
        let password = password.to_owned();

        let Some(user) = user else {
            tokio::task::spawn_blocking(move || verify_against_placeholder(&password))
                .await
                .map_err(AppError::internal)?;
            return Err(DomainError::InvalidCredentials.into());
        };

        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(AppError::internal)??;

        if !matches {
            return Err(DomainError::InvalidCredentials.into());
        }

        Ok(user)
    }

    #[instrument(skip(store))]
    pub async fn find_by_id(store: &dyn UserStore, id: UserId) -> Result<Option<UserRecord>, AppError> {
        Ok(store.find_user_by_id(id).await?)
    }
}

/// bcrypt is CPU-bound; keep it off the async worker threads.
async fn hash_off_thread(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    let start = Instant::now();

    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(AppError::internal)??;

    track_password_hash_duration(start.elapsed().as_secs_f64());
    Ok(hash)
}
