//! Application error types.
//!
//! Failures are raised as [`DomainError`] variants at the point of detection
//! and carried to the HTTP boundary inside an [`AppError`], which owns the
//! status code and renders the JSON body:
//!
//! ```json
//! { "error": "Invalid credentials", "code": "invalid_credentials" }
//! ```
//!
//! Any other error converted with `?` becomes a 500. Its cause is logged and
//! the caller only sees a generic message.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use validator::ValidationErrors;

/// Message returned to callers for unexpected faults.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong";

/// Typed failures of the credential, session, authorization and catalog layers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),
    /// An account with the normalized email already exists.
    #[error("Email already registered")]
    EmailConflict,
    /// Unknown email or wrong password. The message never says which.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// No bearer token on the request.
    #[error("Authentication token missing")]
    MissingToken,
    /// Bad signature, malformed, or expired token.
    #[error("Invalid or expired token")]
    InvalidToken,
    /// An authorization check ran without an authenticated identity.
    #[error("Authentication required")]
    Unauthenticated,
    /// Authenticated, but the role is not allowed.
    #[error("{0}")]
    Forbidden(String),
    /// The course does not exist or the caller's role is outside its audience.
    #[error("Course not found or inaccessible")]
    NotFoundOrForbidden,
    /// A concurrent write claimed the slug first. Safe to retry.
    #[error("Course slug is already taken, please retry")]
    SlugConflict,
}

impl DomainError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::EmailConflict | Self::SlugConflict => StatusCode::CONFLICT,
            Self::InvalidCredentials
            | Self::MissingToken
            | Self::InvalidToken
            | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFoundOrForbidden => StatusCode::NOT_FOUND,
        }
    }

    /// Stable machine-readable tag included in error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::EmailConflict => "email_conflict",
            Self::InvalidCredentials => "invalid_credentials",
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden(_) => "forbidden",
            Self::NotFoundOrForbidden => "not_found",
            Self::SlugConflict => "slug_conflict",
        }
    }

    /// Whether the client may repeat the same request and expect success.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SlugConflict)
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::internal(anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    /// Validator failures, flattened into one readable message.
    pub fn validation(errors: &ValidationErrors) -> Self {
        Self::unprocessable(anyhow::anyhow!("{}", format_validation_errors(errors)))
    }

    /// The domain failure this error was raised from, if any.
    pub fn domain(&self) -> Option<&DomainError> {
        self.error.downcast_ref::<DomainError>()
    }

    pub fn code(&self) -> &'static str {
        if let Some(domain) = self.domain() {
            return domain.code();
        }

        match self.status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => "validation_error",
            StatusCode::UNAUTHORIZED => "unauthenticated",
            StatusCode::FORBIDDEN => "forbidden",
            StatusCode::NOT_FOUND => "not_found",
            StatusCode::CONFLICT => "conflict",
            _ => "internal_error",
        }
    }

    /// JSON body sent to the client. Server errors get a generic message and
    /// retryable domain failures carry `"retryable": true`.
    pub fn body(&self) -> Value {
        let message = if self.status.is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.error.to_string()
        };

        let mut body = json!({
            "error": message,
            "code": self.code(),
        });
        if self.domain().is_some_and(DomainError::is_retryable) {
            body["retryable"] = Value::Bool(true);
        }
        body
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = ?self.error, status = %self.status.as_u16(), "Unexpected error");
        }

        (self.status, Json(self.body())).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        let error = err.into();
        match error.downcast_ref::<DomainError>() {
            Some(domain) => Self::new(domain.status(), error),
            None => Self::internal(error),
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();

    // Nested module/class failures are reported per parent field.
    for (field, kind) in errors.errors() {
        if !matches!(kind, validator::ValidationErrorsKind::Field(_)) {
            messages.push(format!("{} is invalid", field));
        }
    }

    messages.sort();
    messages.join(", ")
}
