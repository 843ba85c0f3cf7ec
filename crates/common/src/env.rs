//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before any store is opened.

use std::path::Path;

use tracing::{debug, warn};

/// Ensure the data directory exists and is writable; warn when the
/// optional frontend directory is missing.
pub async fn ensure_env(frontend_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(%frontend_dir, "frontend assets directory not found; static assets may 404");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;

    let marker = Path::new(data_dir).join(format!(".write-check-{}", std::process::id()));
    tokio::fs::write(&marker, b"")
        .await
        .map_err(|e| anyhow::anyhow!("data directory {data_dir} is not writable: {e}"))?;
    let _ = tokio::fs::remove_file(&marker).await;
    debug!(%data_dir, "data directory ready");
    Ok(())
}
