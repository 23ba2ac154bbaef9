use std::sync::Arc;

use tracing::{info, warn};

use super::{
    config::Config,
    database::{Store, shared_store},
    repository::Repository,
};

pub struct AppState {
    pub config: Config,
    pub repository: Repository,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let store = shared_store(&config.store_url).await?;
        let state = Self::with_store(config, store);

        if state.config.admin_token.is_none() {
            warn!("No admin token configured, admin routes are open");
        }

        if state.config.seed_fixtures {
            if state.repository.has_test_data().await? {
                info!("Fixtures already present, skipping seed");
            } else {
                state.repository.seed_fixtures().await?;
            }
        }

        Ok(state)
    }

    pub fn with_store(config: Config, store: Arc<dyn Store>) -> Arc<Self> {
        Arc::new(Self {
            config,
            repository: Repository::new(store),
        })
    }
}
