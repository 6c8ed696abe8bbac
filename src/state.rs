use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::meals::{memory::InMemoryMealStore, repo::MealStore, repo::PgMealStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MealStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn MealStore> = match &config.database_url {
            Some(url) => {
                let db = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .connect(url)
                    .await
                    .context("connect to database")?;
                let store = PgMealStore::new(db);
                store.migrate().await?;
                info!("using postgres meal store");
                Arc::new(store)
            }
            None => {
                warn!("DATABASE_URL not set; meals are kept in memory only");
                Arc::new(InMemoryMealStore::new())
            }
        };

        Ok(Self::from_parts(store, Arc::new(config)))
    }

    pub fn from_parts(store: Arc<dyn MealStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::fake_with(AppConfig::default())
    }

    #[cfg(test)]
    pub fn fake_with(config: AppConfig) -> Self {
        Self::from_parts(Arc::new(InMemoryMealStore::new()), Arc::new(config))
    }
}
