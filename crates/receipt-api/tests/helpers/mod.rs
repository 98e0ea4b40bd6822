//! Test helpers: build the router over a throwaway database and upload directory.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use receipt_api::setup::routes;
use receipt_api::AppState;
use receipt_core::{BaseConfig, Config, ReceiptServiceConfig};
use receipt_services::{LocalStorage, Storage, StubExtractor};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

pub const PDF_BYTES: &[u8] = b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog >>\nendobj\n%%EOF\n";

/// Test application: server, pool, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub storage: Arc<dyn Storage>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn create_test_config(temp_dir: &TempDir) -> Config {
    Config(Box::new(ReceiptServiceConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["http://localhost:3000".to_string()],
            db_max_connections: 4,
            db_timeout_seconds: 5,
            http_concurrency_limit: 64,
            environment: "test".to_string(),
        },
        database_url: format!(
            "sqlite://{}",
            temp_dir.path().join("receipts.db").display()
        ),
        upload_dir: temp_dir.path().join("uploads").display().to_string(),
        max_upload_size_bytes: 1024 * 1024,
    }))
}

/// Setup test app with an isolated SQLite file and local storage.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = create_test_config(&temp_dir);

    let options = SqliteConnectOptions::new()
        .filename(temp_dir.path().join("receipts.db"))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections())
        .connect_with(options)
        .await
        .expect("Failed to connect to test database");
    receipt_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(config.upload_dir())
            .await
            .expect("Failed to create local storage"),
    );

    let state = Arc::new(AppState::new(
        config.clone(),
        pool.clone(),
        storage.clone(),
        Arc::new(StubExtractor),
    ));
    let app = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        pool,
        storage,
        _temp_dir: temp_dir,
    }
}

/// POST `/upload` with `data` as the `file` field.
pub async fn upload(client: &TestServer, file_name: &str, data: &[u8]) -> serde_json::Value {
    let part = Part::bytes(bytes::Bytes::copy_from_slice(data))
        .file_name(file_name.to_string())
        .mime_type("application/pdf");
    let response = client
        .post("/upload")
        .multipart(MultipartForm::new().add_part("file", part))
        .await;
    assert_eq!(response.status_code(), 200, "upload of {file_name} failed");
    response.json()
}

/// Upload `data` and return `(file_id, file_name)`.
pub async fn upload_id(client: &TestServer, file_name: &str, data: &[u8]) -> (i64, String) {
    let body = upload(client, file_name, data).await;
    let file_id = body["file_id"].as_i64().expect("file_id in upload response");
    (file_id, file_name.to_string())
}

pub fn file_ref(file_id: i64, file_name: &str) -> serde_json::Value {
    serde_json::json!({ "file_id": file_id, "file_name": file_name })
}
