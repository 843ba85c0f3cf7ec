#![cfg(test)]
use std::path::PathBuf;

use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use sea_orm::DatabaseConnection;

/// Fresh migrated SQLite database in a temp file; caller removes the file.
pub async fn temp_sqlite() -> Result<(DatabaseConnection, PathBuf), anyhow::Error> {
    let path = std::env::temp_dir().join(format!("svc_guestbook_{}.db", uuid::Uuid::new_v4()));
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok((db, path))
}
