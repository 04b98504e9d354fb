//! Common test utilities for docsync integration tests

use docsync::{DocumentEvent, Subscription};
use std::time::Duration;

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

/// Wait for the next event without blocking the runtime
pub async fn next_event(subscription: &Subscription, timeout: Duration) -> Option<DocumentEvent> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if let Some(event) = subscription.try_next() {
            return Some(event);
        }
        if tokio::time::Instant::now() >= deadline {
            return None;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Wait until a snapshot matching `predicate` arrives, skipping others
pub async fn wait_for_snapshot<F>(
    subscription: &Subscription,
    timeout: Duration,
    predicate: F,
) -> Option<Option<serde_json::Value>>
where
    F: Fn(&Option<serde_json::Value>) -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        match next_event(subscription, remaining).await {
            Some(DocumentEvent::Snapshot(doc)) if predicate(&doc) => return Some(doc),
            Some(_) => continue,
            None => return None,
        }
    }
    None
}
