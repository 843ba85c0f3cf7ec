use std::net::SocketAddr;

use configs::{AppConfig, StorageBackend};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    data_dir: String,
}

async fn start_server(backend: StorageBackend) -> anyhow::Result<TestApp> {
    // Isolated data directory per test run
    let data_dir = format!("target/test-data/{}", Uuid::new_v4());
    let mut cfg = AppConfig::default();
    cfg.server.frontend_dir = "target/test-data/no-frontend".into();
    cfg.storage.backend = backend;
    cfg.storage.data_dir = data_dir.clone();
    cfg.database.url = format!("sqlite://{}/messages.db?mode=rwc", data_dir);
    cfg.normalize_and_validate()?;

    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_dir })
}

async fn guestbook_round_trip(backend: StorageBackend) -> anyhow::Result<()> {
    let app = start_server(backend).await?;
    let c = reqwest::Client::new();
    let url = format!("{}/api/guestbook", app.base_url);

    let res = c.get(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));

    let res = c.post(&url).json(&json!({"name": "Asha", "message": "Congrats!"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let asha = res.json::<Value>().await?;

    let res = c.post(&url).json(&json!({"name": "Ravi", "message": "So happy for you"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let ravi = res.json::<Value>().await?;

    let res = c.post(&url).json(&json!({"name": "Sam", "message": ""})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Name and message are required");

    let list = c.get(&url).send().await?.json::<Value>().await?;
    assert_eq!(list, json!([ravi, asha]));

    let _ = tokio::fs::remove_dir_all(&app.data_dir).await;
    Ok(())
}

#[tokio::test]
async fn e2e_file_backend_round_trip() -> anyhow::Result<()> {
    guestbook_round_trip(StorageBackend::File).await
}

#[tokio::test]
async fn e2e_database_backend_round_trip() -> anyhow::Result<()> {
    guestbook_round_trip(StorageBackend::Database).await
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server(StorageBackend::File).await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    let _ = tokio::fs::remove_dir_all(&app.data_dir).await;
    Ok(())
}
