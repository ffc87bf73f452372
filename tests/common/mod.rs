#![allow(dead_code)]

use axum_test::TestServer;
use shortener::application::services::{UrlService, UrlServiceSettings};
use shortener::infrastructure::persistence::SqliteUrlRepository;
use shortener::routes::app_router;
use shortener::state::AppState;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const BASE_URL: &str = "http://localhost:8000";

/// Fresh in-memory database with migrations applied.
///
/// A single long-lived connection keeps the in-memory database alive for the
/// whole test.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations/sqlite")
        .run(&pool)
        .await
        .unwrap();

    pool
}

/// Database file in the temp directory shared by `max_connections`
/// connections, for tests that need statements to run in parallel.
///
/// Remove it with [`remove_file_db`] when done.
pub async fn create_file_pool(max_connections: u32) -> (SqlitePool, PathBuf) {
    let path = std::env::temp_dir().join(format!(
        "shortener-test-{}.db",
        shortener::utils::key_generator::random_key(12)
    ));

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(10));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .unwrap();

    sqlx::migrate!("./migrations/sqlite")
        .run(&pool)
        .await
        .unwrap();

    (pool, path)
}

pub async fn remove_file_db(pool: SqlitePool, path: PathBuf) {
    pool.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}

pub fn test_settings() -> UrlServiceSettings {
    UrlServiceSettings {
        base_url: BASE_URL.to_string(),
        url_key_min_length: 5,
        url_key_max_length: 32,
        dedupe_target_urls: false,
    }
}

pub fn create_test_service(pool: SqlitePool, settings: UrlServiceSettings) -> Arc<UrlService> {
    let repo = Arc::new(SqliteUrlRepository::new(Arc::new(pool)));
    Arc::new(UrlService::new(repo, settings))
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(create_test_service(pool, test_settings()))
}

pub fn create_test_server(pool: SqlitePool) -> TestServer {
    TestServer::new(app_router(create_test_state(pool))).unwrap()
}

pub async fn create_test_url(pool: &SqlitePool, key: &str, url: &str) {
    sqlx::query(
        r#"INSERT INTO urls ("key", secret_key, target_url, created_at) VALUES (?, ?, ?, ?)"#,
    )
    .bind(key)
    .bind(format!("{key}_SECRET00"))
    .bind(url)
    .bind(chrono::Utc::now())
    .execute(pool)
    .await
    .unwrap();
}

pub async fn create_inactive_url(pool: &SqlitePool, key: &str, url: &str) {
    sqlx::query(
        r#"
        INSERT INTO urls ("key", secret_key, target_url, is_active, created_at, deactivated_at)
        VALUES (?, ?, ?, 0, ?, ?)
        "#,
    )
    .bind(key)
    .bind(format!("{key}_SECRET00"))
    .bind(url)
    .bind(chrono::Utc::now())
    .bind(chrono::Utc::now())
    .execute(pool)
    .await
    .unwrap();
}

pub async fn clicks_of(pool: &SqlitePool, key: &str) -> i64 {
    sqlx::query_scalar(r#"SELECT clicks FROM urls WHERE "key" = ?"#)
        .bind(key)
        .fetch_one(pool)
        .await
        .unwrap()
}
