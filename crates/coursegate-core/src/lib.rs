//! # Coursegate Core
//!
//! Core types, errors, and utilities for the Coursegate API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: The domain error taxonomy and its HTTP translation
//! - [`pagination`]: Pagination utilities for API responses
//! - [`password`]: Salted, adaptive password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers for query strings
//! - [`slug`]: URL-safe slug derivation from free-form titles
//!
//! # Example
//!
//! ```ignore
//! use coursegate_core::{AppError, DomainError};
//! use coursegate_core::password::{hash_password, verify_password};
//! use coursegate_core::slug::slugify;
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//!
//! assert_eq!(slugify("Intro to UX"), "intro-to-ux");
//!
//! let err: AppError = DomainError::EmailConflict.into();
//! assert_eq!(err.status.as_u16(), 409);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;
pub mod slug;

// Re-export commonly used types at crate root
pub use errors::{AppError, DomainError};
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
