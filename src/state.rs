use std::sync::Arc;

use anyhow::Context;

use crate::auth::jwt::JwtKeys;
use crate::config::AppConfig;
use crate::store::{AccountStore, PgStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AccountStore>,
    pub config: Arc<AppConfig>,
    pub keys: Arc<JwtKeys>,
}

impl AppState {
    /// Loads config from the environment and connects to Postgres.
    /// Returns the concrete store as well so the caller can run migrations on its pool.
    pub async fn init() -> anyhow::Result<(Self, PgStore)> {
        let config = AppConfig::from_env()?;
        let store = PgStore::connect(&config.database_url, config.db_max_connections)
            .await
            .context("connect to database")?;
        let state = Self::from_parts(Arc::new(store.clone()), config);
        Ok((state, store))
    }

    pub fn from_parts(store: Arc<dyn AccountStore>, config: AppConfig) -> Self {
        let keys = Arc::new(JwtKeys::new(&config.jwt));
        Self {
            store,
            config: Arc::new(config),
            keys,
        }
    }
}
