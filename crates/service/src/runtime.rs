//! Runtime environment helpers
//!
//! Startup-time wiring: directory checks and construction of the configured
//! entry store, so binaries never touch storage details directly.

use std::sync::Arc;

use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use tracing::info;

use crate::db::seaorm_entry_store::SeaOrmEntryStore;
use crate::file::json_entry_store::JsonFileEntryStore;
use crate::guestbook::store::EntryStore;

/// Ensure expected directories exist; warn on missing optional ones.
pub async fn ensure_env(frontend_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(frontend_dir, data_dir).await
}

/// Open the store selected by `storage.backend`. The database backend is
/// migrated before it is handed out.
pub async fn open_entry_store(cfg: &AppConfig) -> anyhow::Result<Arc<dyn EntryStore>> {
    let store: Arc<dyn EntryStore> = match cfg.storage.backend {
        StorageBackend::File => {
            let path = cfg.storage.file_path();
            info!(path = %path.display(), "opening file-backed guestbook store");
            JsonFileEntryStore::new(path).await?
        }
        StorageBackend::Database => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            info!(url = %cfg.database.url, "guestbook database migrated");
            Arc::new(SeaOrmEntryStore::new(db))
        }
    };
    Ok(store)
}
