mod common;

use std::sync::Arc;

use tokio::task::JoinSet;

use shortener::domain::entities::{NewUrlRecord, RecordState};
use shortener::domain::repositories::UrlRepository;
use shortener::error::AppError;
use shortener::infrastructure::persistence::SqliteUrlRepository;

fn new_record(key: &str, url: &str) -> NewUrlRecord {
    NewUrlRecord {
        key: key.to_string(),
        secret_key: format!("{key}_ABCdef12"),
        target_url: url.to_string(),
    }
}

#[tokio::test]
async fn test_create_url() {
    let pool = common::create_test_pool().await;
    let repo = SqliteUrlRepository::new(Arc::new(pool));

    let record = repo
        .create(new_record("abcde", "https://example.com"))
        .await
        .unwrap();

    assert!(record.id > 0);
    assert_eq!(record.key, "abcde");
    assert_eq!(record.secret_key, "abcde_ABCdef12");
    assert_eq!(record.target_url, "https://example.com");
    assert!(record.is_active);
    assert_eq!(record.clicks, 0);
    assert!(record.last_clicked_at.is_none());
    assert!(record.deactivated_at.is_none());
}

#[tokio::test]
async fn test_create_duplicate_key_is_conflict() {
    let pool = common::create_test_pool().await;
    let repo = SqliteUrlRepository::new(Arc::new(pool));

    repo.create(new_record("dupes", "https://a.com"))
        .await
        .unwrap();

    let result = repo
        .create(NewUrlRecord {
            key: "dupes".to_string(),
            secret_key: "dupes_Other123".to_string(),
            target_url: "https://b.com".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[tokio::test]
async fn test_find_by_key_respects_state() {
    let pool = common::create_test_pool().await;
    common::create_inactive_url(&pool, "sleep", "https://example.com").await;
    let repo = SqliteUrlRepository::new(Arc::new(pool));

    assert!(repo.find_by_key("sleep", false).await.unwrap().is_none());

    let record = repo.find_by_key("sleep", true).await.unwrap().unwrap();
    assert_eq!(record.state(), RecordState::Inactive);
    assert!(record.deactivated_at.is_some());
}

#[tokio::test]
async fn test_find_by_key_not_found() {
    let pool = common::create_test_pool().await;
    let repo = SqliteUrlRepository::new(Arc::new(pool));

    assert!(repo.find_by_key("nopee", true).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_by_secret_key() {
    let pool = common::create_test_pool().await;
    common::create_test_url(&pool, "abcde", "https://example.com").await;
    let repo = SqliteUrlRepository::new(Arc::new(pool));

    let record = repo
        .find_by_secret_key("abcde_SECRET00", false)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.key, "abcde");

    assert!(
        repo.find_by_secret_key("abcde", true)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_find_by_target_url_only_active() {
    let pool = common::create_test_pool().await;
    common::create_inactive_url(&pool, "first", "https://example.com").await;
    common::create_test_url(&pool, "secnd", "https://example.com").await;
    let repo = SqliteUrlRepository::new(Arc::new(pool));

    let record = repo
        .find_by_target_url("https://example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(record.key, "secnd");
    assert!(
        repo.find_by_target_url("https://other.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_record_click() {
    let pool = common::create_test_pool().await;
    let repo = SqliteUrlRepository::new(Arc::new(pool));

    let record = repo
        .create(new_record("click", "https://example.com"))
        .await
        .unwrap();

    let once = repo.record_click(record.id).await.unwrap();
    assert_eq!(once.clicks, 1);
    assert!(once.last_clicked_at.is_some());

    let twice = repo.record_click(record.id).await.unwrap();
    assert_eq!(twice.clicks, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clicks_are_not_lost() {
    const CLICKS: i64 = 50;

    let (pool, path) = common::create_file_pool(8).await;
    let repo = Arc::new(SqliteUrlRepository::new(Arc::new(pool.clone())));

    let record = repo
        .create(new_record("burst", "https://example.com"))
        .await
        .unwrap();

    let id = record.id;
    let mut clicks = JoinSet::new();
    for _ in 0..CLICKS {
        let repo = repo.clone();
        clicks.spawn(async move { repo.record_click(id).await });
    }
    while let Some(result) = clicks.join_next().await {
        result.unwrap().unwrap();
    }

    let stored = repo.find_by_key("burst", false).await.unwrap().unwrap();
    assert_eq!(stored.clicks, CLICKS);
    assert!(stored.last_clicked_at.is_some());

    drop(repo);
    common::remove_file_db(pool, path).await;
}

#[tokio::test]
async fn test_record_click_missing_id() {
    let pool = common::create_test_pool().await;
    let repo = SqliteUrlRepository::new(Arc::new(pool));

    let result = repo.record_click(9999).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_deactivate_and_reactivate() {
    let pool = common::create_test_pool().await;
    common::create_test_url(&pool, "abcde", "https://example.com").await;
    let repo = SqliteUrlRepository::new(Arc::new(pool));

    let deactivated = repo.deactivate("abcde_SECRET00").await.unwrap().unwrap();
    assert!(!deactivated.is_active);
    assert!(deactivated.deactivated_at.is_some());

    // Already inactive
    assert!(repo.deactivate("abcde_SECRET00").await.unwrap().is_none());

    let reactivated = repo.reactivate("abcde_SECRET00").await.unwrap().unwrap();
    assert!(reactivated.is_active);
    assert!(reactivated.deactivated_at.is_none());

    // Already active
    assert!(repo.reactivate("abcde_SECRET00").await.unwrap().is_none());
}

#[tokio::test]
async fn test_deactivate_unknown_secret() {
    let pool = common::create_test_pool().await;
    let repo = SqliteUrlRepository::new(Arc::new(pool));

    assert!(repo.deactivate("nobody_00000000").await.unwrap().is_none());
    assert!(repo.reactivate("nobody_00000000").await.unwrap().is_none());
}

#[tokio::test]
async fn test_stats() {
    let pool = common::create_test_pool().await;
    common::create_test_url(&pool, "aaaaa", "https://a.com").await;
    common::create_test_url(&pool, "bbbbb", "https://b.com").await;
    common::create_inactive_url(&pool, "ccccc", "https://c.com").await;
    let repo = SqliteUrlRepository::new(Arc::new(pool));

    let record = repo.find_by_key("aaaaa", false).await.unwrap().unwrap();
    repo.record_click(record.id).await.unwrap();
    repo.record_click(record.id).await.unwrap();

    let stats = repo.stats().await.unwrap();

    assert_eq!(stats.total, 3);
    assert_eq!(stats.active, 2);
    assert_eq!(stats.clicks, 2);
}

#[tokio::test]
async fn test_stats_empty() {
    let pool = common::create_test_pool().await;
    let repo = SqliteUrlRepository::new(Arc::new(pool));

    let stats = repo.stats().await.unwrap();

    assert_eq!(stats.total, 0);
    assert_eq!(stats.active, 0);
    assert_eq!(stats.clicks, 0);
}

#[tokio::test]
async fn test_ping() {
    let pool = common::create_test_pool().await;
    let repo = SqliteUrlRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
