//! Document-store backend selection.
//!
//! - `DATABASE_URL` set: PostgreSQL, with migrations applied at startup.
//! - `DATABASE_URL` unset: an in-process store that forgets everything on
//!   restart. Intended for local development and tests only.

use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres { url: String, max_connections: u32 },
    Memory,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => Self::Postgres {
                url,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            },
            _ => Self::Memory,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres { .. } => "postgres",
            Self::Memory => "memory",
        }
    }
}
