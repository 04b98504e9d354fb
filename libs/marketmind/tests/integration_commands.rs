//! Write command integration tests against the in-memory source

mod common;

use std::sync::Arc;

use common::fixtures::*;
use common::{path, seeded_source, DAY, NOW};
use docsync::{DocSyncError, DocumentSource};
use marketmind::application::{CommandError, Confirmation, UnsubscribeOutcome, WriteCommands};
use marketmind::domain::{DocumentKind, Store, DEFAULT_COLLECTION};
use serde_json::json;

fn watchlist(source: &docsync::MemoryDocumentSource) -> serde_json::Value {
    source.document(&path(DocumentKind::Watchlist)).unwrap()["tickers"].clone()
}

#[tokio::test]
async fn test_subscribe_normalizes_and_dedupes() {
    let source = seeded_source(vec![], vec![], vec![], &["AAPL"]);
    let commands = WriteCommands::new(Arc::new(source.clone()), DEFAULT_COLLECTION);
    let store = Store::new();

    assert_eq!(commands.subscribe(&store, " nvda ").await.unwrap(), "NVDA");
    assert_eq!(commands.subscribe(&store, "NVDA").await.unwrap(), "NVDA");

    assert_eq!(watchlist(&source), json!(["AAPL", "NVDA"]));
}

#[tokio::test]
async fn test_subscribe_rejects_blank_input() {
    let source = seeded_source(vec![], vec![], vec![], &[]);
    let commands = WriteCommands::new(Arc::new(source.clone()), DEFAULT_COLLECTION);

    let err = commands.subscribe(&Store::new(), "   ").await.unwrap_err();
    assert_eq!(err, CommandError::EmptyTicker);
    assert_eq!(source.write_count(), 0);
}

#[tokio::test]
async fn test_commands_refused_in_error_state() {
    let source = seeded_source(vec![], vec![], vec![], &["AAPL"]);
    let commands = WriteCommands::new(Arc::new(source.clone()), DEFAULT_COLLECTION);
    let mut store = Store::new();
    store.enter_error_state("Not found: market_data");

    assert_eq!(commands.subscribe(&store, "MSFT").await.unwrap_err(), CommandError::NotConnected);
    assert_eq!(
        commands.unsubscribe(&store, "AAPL", Confirmation::Accepted).await.unwrap_err(),
        CommandError::NotConnected
    );
    assert_eq!(source.write_count(), 0);
}

#[tokio::test]
async fn test_declined_unsubscribe_writes_nothing() {
    let source = seeded_source(vec![], vec![], vec![custom_event("AAPL", NOW + DAY)], &["AAPL"]);
    let commands = WriteCommands::new(Arc::new(source.clone()), DEFAULT_COLLECTION);

    let outcome = commands
        .unsubscribe(&Store::new(), "AAPL", Confirmation::Declined)
        .await
        .unwrap();

    assert_eq!(outcome, UnsubscribeOutcome::Declined);
    assert_eq!(source.write_count(), 0);
    assert_eq!(watchlist(&source), json!(["AAPL"]));
}

#[tokio::test]
async fn test_accepted_unsubscribe_cleans_both_documents() {
    let source = seeded_source(
        vec![],
        vec![],
        vec![custom_event("AAPL", NOW + DAY), custom_event("TSLA", NOW + 2.0 * DAY)],
        &["AAPL", "TSLA"],
    );
    let commands = WriteCommands::new(Arc::new(source.clone()), DEFAULT_COLLECTION);

    let outcome = commands
        .unsubscribe(&Store::new(), "AAPL", Confirmation::Accepted)
        .await
        .unwrap();

    assert_eq!(outcome, UnsubscribeOutcome::Removed);
    assert_eq!(source.write_count(), 2);
    assert_eq!(watchlist(&source), json!(["TSLA"]));

    let calendar = source.document(&path(DocumentKind::CustomCalendar)).unwrap();
    let events = calendar["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["ticker"], "TSLA");
    // Producer fields survive the rewrite
    assert_eq!(events[0]["type"], "custom");
}

#[tokio::test]
async fn test_calendar_failure_reports_partial_unsubscribe() {
    let source = seeded_source(vec![], vec![], vec![custom_event("AAPL", NOW + DAY)], &["AAPL"]);
    source.reject_writes(
        &path(DocumentKind::CustomCalendar),
        DocSyncError::WriteRejected("permission denied".to_string()),
    );
    let commands = WriteCommands::new(Arc::new(source.clone()), DEFAULT_COLLECTION);

    let err = commands
        .unsubscribe(&Store::new(), "AAPL", Confirmation::Accepted)
        .await
        .unwrap_err();

    assert!(matches!(err, CommandError::PartialUnsubscribe { ref ticker, .. } if ticker == "AAPL"));
    assert_eq!(watchlist(&source), json!([]));
    let calendar = source.document(&path(DocumentKind::CustomCalendar)).unwrap();
    assert_eq!(calendar["events"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_reconcile_drops_orphaned_entries() {
    let source = seeded_source(
        vec![],
        vec![],
        vec![
            custom_event("AAPL", NOW + DAY),
            custom_event("GONE", NOW + DAY),
            custom_event("TSLA", NOW + DAY),
        ],
        &["AAPL", "TSLA"],
    );
    let commands = WriteCommands::new(Arc::new(source.clone()), DEFAULT_COLLECTION);

    assert_eq!(commands.reconcile_orphans().await.unwrap(), 1);
    assert_eq!(source.write_count(), 1);

    // Nothing left to drop, no further write
    assert_eq!(commands.reconcile_orphans().await.unwrap(), 0);
    assert_eq!(source.write_count(), 1);

    let remaining = source.get(&path(DocumentKind::CustomCalendar)).await.unwrap().unwrap();
    let tickers: Vec<_> = remaining["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["ticker"].as_str().unwrap().to_string())
        .collect();
    verbose_println!("remaining tickers: {:?}", tickers);
    assert_eq!(tickers, vec!["AAPL", "TSLA"]);
}
