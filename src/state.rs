use std::fmt;
use std::sync::Arc;

use coursegate_config::{CorsConfig, JwtConfig, StoreConfig};
use coursegate_db::{CourseStore, MemoryStore, PgStore, StoreError, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub courses: Arc<dyn CourseStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// State backed by a fresh in-memory store.
    pub fn in_memory(jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            courses: Arc::new(store),
            jwt_config,
            cors_config,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_ttl_secs", &self.jwt_config.token_ttl_secs)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

pub async fn init_app_state() -> Result<AppState, StoreError> {
    let jwt_config = JwtConfig::from_env();
    let cors_config = CorsConfig::from_env();
    let store_config = StoreConfig::from_env();

    if jwt_config.is_development_secret() {
        tracing::warn!(
            "JWT_SECRET is not set; using the development fallback secret. Do not run this in production."
        );
    }
    tracing::info!(backend = store_config.backend_name(), "Store selected");

    match store_config {
        StoreConfig::Postgres {
            url,
            max_connections,
        } => {
            let store = PgStore::connect(&url, max_connections).await?;
            Ok(AppState {
                users: Arc::new(store.clone()),
                courses: Arc::new(store),
                jwt_config,
                cors_config,
            })
        }
        StoreConfig::Memory => {
            tracing::warn!("DATABASE_URL is not set; using the in-memory store. Data is lost on restart.");
            Ok(AppState::in_memory(jwt_config, cors_config))
        }
    }
}
