//! # Coursegate Auth
//!
//! Session tokens for the Coursegate API.
//!
//! - [`claims`]: The claim set carried by every session token
//! - [`jwt`]: Issuing and verifying HMAC-signed tokens
//!
//! A token is valid while `now < exp`. There is no leeway, no refresh token,
//! and no server-side revocation: a token stays usable until it expires.
//!
//! # Example
//!
//! ```ignore
//! use coursegate_auth::{issue_token, verify_token};
//! use coursegate_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = issue_token(user.id, &user.email, user.role, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, user.role);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{issue_token, issue_token_at, verify_token, verify_token_at};
