//! Request authentication and authorization.
//!
//! - [`auth`]: Bearer token verification, the `authenticate` middleware and
//!   the [`AuthUser`](auth::AuthUser) extractor
//! - [`role`]: Role-set authorization on top of an authenticated identity
//!
//! # Request Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `authenticate` verifies the token and attaches an `AuthUser`
//! 3. `require_roles` (on write routes) checks the role against the allowed set
//! 4. The handler runs, usually taking `AuthUser` as an extractor
//!
//! # Example
//!
//! ```ignore
//! let router = Router::new()
//!     .route("/", post(create_course))
//!     .route_layer(middleware::from_fn(require_catalog_manager))
//!     .route_layer(middleware::from_fn_with_state(state, authenticate));
//! ```

pub mod auth;
pub mod role;
