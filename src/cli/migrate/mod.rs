//! Migrate command - creates tables and indexes, then exits

use anyhow::Context;
use tracing::info;

use crate::infrastructure::storage::{StorageBackend, StorageFactory, run_storage_migrations};

/// Apply pending migrations against the configured backend
///
/// The in-memory backend has no schema, so this is a no-op there.
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let storage_config = config.storage.to_storage_config()?;
    let backend = StorageFactory::connect(&storage_config)
        .await
        .context("Failed to open storage backend")?;

    match backend {
        StorageBackend::InMemory => {
            info!("In-memory storage selected, nothing to migrate");
        }
        StorageBackend::Postgres(pool) => {
            let applied = run_storage_migrations(&pool).await?;
            info!(applied, "Storage migrations complete");
        }
    }

    Ok(())
}
