pub mod connection;
pub mod migrations;
pub mod repositories;
pub mod storage;

use std::sync::Arc;

use tracing::info;

use giftwise_core::config::StorageConfig;

pub use connection::{connect, connect_with_settings, DbPool};
pub use repositories::{
    InMemoryKeyValueStore, KeyValueStore, RepositoryError, SqlKeyValueStore, StorageKey,
};
pub use storage::Storage;

/// Opens the store named by `config.url`, running pending migrations for SQLite.
pub async fn open_storage(config: &StorageConfig) -> Result<Storage, RepositoryError> {
    if config.is_memory() {
        info!(event_name = "storage.opened", backend = "memory", "opened in-memory storage");
        return Ok(Storage::in_memory());
    }

    let pool =
        connect_with_settings(&config.url, config.max_connections, config.timeout_secs).await?;
    migrations::run_pending(&pool).await?;
    info!(
        event_name = "storage.opened",
        backend = "sqlite",
        url = %config.url,
        "opened sqlite storage"
    );

    Ok(Storage::new(Arc::new(SqlKeyValueStore::new(pool))))
}
