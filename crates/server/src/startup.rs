use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{metrics, routes::{self, ServerState}};
use service::runtime;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Check directories, open the configured entry store and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    runtime::ensure_env(&cfg.server.frontend_dir, &cfg.storage.data_dir).await?;

    let store = runtime::open_entry_store(cfg).await?;
    info!(backend = store.backend(), "guestbook store ready");
    metrics::init();

    let state = ServerState::new(store);
    Ok(routes::build_router(state, build_cors(), &cfg.server.frontend_dir))
}

/// Public entry: build the app and serve HTTP until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting guestbook server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("guestbook server drained");
    Ok(())
}
