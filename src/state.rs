use std::sync::Arc;

use crate::config::AppConfig;
use crate::vendors::{MemoryProfileStore, PgProfileStore, ProfileStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn from_parts(store: Arc<dyn ProfileStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    /// State over a pool the caller already connected.
    pub fn with_pg(db: sqlx::PgPool, config: AppConfig) -> Self {
        Self::from_parts(Arc::new(PgProfileStore::new(db)), Arc::new(config))
    }

    /// Empty in-memory store and default config, for tests.
    pub fn fake() -> Self {
        Self::from_parts(
            Arc::new(MemoryProfileStore::new()),
            Arc::new(AppConfig::default()),
        )
    }
}
