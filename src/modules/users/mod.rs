//! Credential store: account creation and password verification.
//!
//! There are no user-facing routes here; registration and login in
//! [`auth`](crate::modules::auth) and the admin CLI go through
//! [`UserService`](service::UserService).

pub mod service;

pub use service::UserService;
