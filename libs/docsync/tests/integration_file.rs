//! Integration tests for the filesystem document source

mod common;

use common::{next_event, wait_for_snapshot};
use docsync::{
    DocSyncError, DocumentEvent, DocumentSource, DocumentWrite, FileDocumentSource,
    FileSourceConfig, FixedDelay,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const NEWS: &str = "market_data/news";
const TIMEOUT: Duration = Duration::from_secs(3);

fn source_for(root: &std::path::Path) -> FileDocumentSource {
    FileDocumentSource::new(
        FileSourceConfig::new(root)
            .with_poll_interval(Duration::from_millis(20))
            .with_reconnect(Arc::new(FixedDelay::new(Duration::from_millis(20), None))),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_missing_root_fails_subscribe_with_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_for(&dir.path().join("does-not-exist"));

    let err = source.subscribe(NEWS).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_missing_file_is_absent_document() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_for(dir.path());

    let sub = source.subscribe(NEWS).await.unwrap();
    assert_eq!(next_event(&sub, TIMEOUT).await, Some(DocumentEvent::Snapshot(None)));
    assert_eq!(source.get(NEWS).await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_external_file_changes_are_pushed() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_for(dir.path());
    let sub = source.subscribe(NEWS).await.unwrap();
    assert_eq!(next_event(&sub, TIMEOUT).await, Some(DocumentEvent::Snapshot(None)));

    std::fs::create_dir_all(dir.path().join("market_data")).unwrap();
    std::fs::write(
        dir.path().join("market_data/news.json"),
        r#"{"articles": [{"title": "CPI", "impact": "多", "score": 9}]}"#,
    )
    .unwrap();

    let doc = wait_for_snapshot(&sub, TIMEOUT, |doc| doc.is_some()).await;
    let doc = doc.flatten().expect("snapshot with document");
    assert_eq!(doc["articles"][0]["title"], "CPI");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_writes_are_observed_by_watchers() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_for(dir.path());
    let sub = source.subscribe("market_data/watchlist").await.unwrap();

    source
        .write(
            "market_data/watchlist",
            DocumentWrite::new().array_union("tickers", json!("MSFT")),
        )
        .await
        .unwrap();

    let doc = wait_for_snapshot(&sub, TIMEOUT, |doc| doc.is_some()).await;
    assert_eq!(doc.flatten(), Some(json!({"tickers": ["MSFT"]})));
    assert!(!dir.path().join("market_data/watchlist.json.tmp").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unchanged_file_is_not_republished() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("market_data")).unwrap();
    std::fs::write(dir.path().join("market_data/news.json"), r#"{"articles": []}"#).unwrap();

    let source = source_for(dir.path());
    let sub = source.subscribe(NEWS).await.unwrap();

    assert!(matches!(
        next_event(&sub, TIMEOUT).await,
        Some(DocumentEvent::Snapshot(Some(_)))
    ));
    // Several poll intervals pass without a change
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(sub.drain().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_malformed_file_reports_unavailable_then_recovers() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("market_data")).unwrap();
    let file = dir.path().join("market_data/news.json");
    std::fs::write(&file, "{not json").unwrap();

    let source = source_for(dir.path());
    let sub = source.subscribe(NEWS).await.unwrap();

    match next_event(&sub, TIMEOUT).await {
        Some(DocumentEvent::Error(err)) => {
            assert!(matches!(err, DocSyncError::Unavailable(_)));
            assert!(err.is_transient());
        }
        other => panic!("expected unavailable error, got {:?}", other),
    }

    std::fs::write(&file, r#"{"articles": []}"#).unwrap();
    let doc = wait_for_snapshot(&sub, TIMEOUT, |doc| doc.is_some()).await;
    assert_eq!(doc.flatten(), Some(json!({"articles": []})));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_write_to_missing_root_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_for(&dir.path().join("gone"));

    let err = source
        .write(NEWS, DocumentWrite::new().set("articles", json!([])))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
