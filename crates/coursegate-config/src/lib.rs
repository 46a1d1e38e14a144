//! # Coursegate Config
//!
//! Configuration types for the Coursegate API.
//!
//! Every structure here is loaded once from environment variables at startup
//! and shared read-only afterwards:
//!
//! - [`jwt`]: Session token signing secret and TTL
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listener and metrics addresses
//! - [`store`]: Document-store backend selection
//!
//! # Example
//!
//! ```ignore
//! use coursegate_config::{CorsConfig, JwtConfig, ServerConfig, StoreConfig};
//!
//! dotenvy::dotenv().ok();
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! let store_config = StoreConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;
pub mod store;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use store::StoreConfig;
