//! Picks the repository variant named by the configuration.

use std::sync::Arc;

use tasks_core::{MemoryTaskRepository, TaskRepository};

use crate::config::{Config, StorageMode};
use crate::postgres::PostgresTaskRepository;

pub async fn open(config: &Config) -> Result<Arc<dyn TaskRepository>, sqlx::Error> {
    match config.storage {
        StorageMode::Memory => {
            tracing::info!("using in-memory storage");
            Ok(Arc::new(MemoryTaskRepository::new()))
        }
        StorageMode::Postgres => {
            let repository = PostgresTaskRepository::connect(
                &config.database_url,
                config.db_max_connections,
                config.storage_timeout,
            )
            .await?;
            tracing::info!("connected to postgres");
            Ok(Arc::new(repository))
        }
    }
}
