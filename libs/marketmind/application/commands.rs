//! Write operations against the watchlist and custom calendar documents
//!
//! Success is never applied locally; the listener layer observes the
//! resulting snapshot.

use std::collections::HashSet;
use std::sync::Arc;

use docsync::{DocSyncError, DocumentSource, DocumentWrite};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{CustomCalendarDocument, DocumentKind, Store, WatchlistDocument};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Database not connected")]
    NotConnected,

    #[error("Please enter a valid ticker")]
    EmptyTicker,

    #[error("Write failed: {0}")]
    Write(#[from] DocSyncError),

    /// Watchlist removal landed but the calendar cleanup did not
    #[error("Removed {ticker} from the watchlist but its calendar entries remain: {source}")]
    PartialUnsubscribe {
        ticker: String,
        #[source]
        source: DocSyncError,
    },
}

/// User answer to the unsubscribe prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsubscribeOutcome {
    Declined,
    Removed,
}

/// Uppercased, trimmed ticker or `None` when nothing is left
pub fn normalize_ticker(input: &str) -> Option<String> {
    let ticker = input.trim().to_uppercase();
    (!ticker.is_empty()).then_some(ticker)
}

pub struct WriteCommands {
    source: Arc<dyn DocumentSource>,
    collection: String,
}

impl WriteCommands {
    pub fn new(source: Arc<dyn DocumentSource>, collection: impl Into<String>) -> Self {
        Self {
            source,
            collection: collection.into(),
        }
    }

    fn path(&self, kind: DocumentKind) -> String {
        kind.path(&self.collection)
    }

    /// Set-union the ticker into the watchlist
    pub async fn subscribe(&self, store: &Store, input: &str) -> Result<String, CommandError> {
        if store.is_error() {
            return Err(CommandError::NotConnected);
        }
        let ticker = normalize_ticker(input).ok_or(CommandError::EmptyTicker)?;

        self.source
            .write(
                &self.path(DocumentKind::Watchlist),
                DocumentWrite::new().array_union("tickers", json!(ticker)),
            )
            .await?;

        info!("[Commands] Subscribed {}", ticker);
        Ok(ticker)
    }

    /// Remove the ticker from the watchlist, then its calendar entries.
    ///
    /// The two writes are sequential and not atomic; a failure of the
    /// second surfaces as `PartialUnsubscribe`.
    pub async fn unsubscribe(
        &self,
        store: &Store,
        ticker: &str,
        confirmation: Confirmation,
    ) -> Result<UnsubscribeOutcome, CommandError> {
        if confirmation == Confirmation::Declined {
            return Ok(UnsubscribeOutcome::Declined);
        }
        if store.is_error() {
            return Err(CommandError::NotConnected);
        }

        self.source
            .write(
                &self.path(DocumentKind::Watchlist),
                DocumentWrite::new().array_remove("tickers", json!(ticker)),
            )
            .await?;

        self.remove_calendar_entries(ticker)
            .await
            .map_err(|source| CommandError::PartialUnsubscribe {
                ticker: ticker.to_string(),
                source,
            })?;

        info!("[Commands] Unsubscribed {}", ticker);
        Ok(UnsubscribeOutcome::Removed)
    }

    async fn remove_calendar_entries(&self, ticker: &str) -> Result<(), DocSyncError> {
        let path = self.path(DocumentKind::CustomCalendar);
        let Some(current) = self.source.get(&path).await? else {
            return Ok(());
        };

        let events = retained_events(current, |t| t != ticker)?;
        self.source
            .write(&path, DocumentWrite::new().set("events", Value::Array(events)))
            .await
    }

    /// Drop calendar entries whose ticker left the watchlist; returns how many
    pub async fn reconcile_orphans(&self) -> Result<usize, CommandError> {
        let watchlist_path = self.path(DocumentKind::Watchlist);
        let calendar_path = self.path(DocumentKind::CustomCalendar);

        let (Some(watchlist), Some(calendar)) = (
            self.source.get(&watchlist_path).await?,
            self.source.get(&calendar_path).await?,
        ) else {
            return Ok(0);
        };

        let watchlist: WatchlistDocument = serde_json::from_value(watchlist)
            .map_err(|e| CommandError::Write(DocSyncError::from(e)))?;
        let tickers: HashSet<&str> = watchlist.tickers.iter().map(String::as_str).collect();

        let before = calendar_len(&calendar);
        let kept = retained_events(calendar, |t| tickers.contains(t))?;
        let dropped = before.saturating_sub(kept.len());
        if dropped == 0 {
            return Ok(0);
        }

        self.source
            .write(&calendar_path, DocumentWrite::new().set("events", Value::Array(kept)))
            .await?;
        warn!("[Commands] Reconciled {} orphaned calendar entries", dropped);
        Ok(dropped)
    }
}

fn calendar_len(calendar: &Value) -> usize {
    calendar
        .get("events")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// Raw events whose ticker passes `keep`, preserving unknown fields
fn retained_events(calendar: Value, keep: impl Fn(&str) -> bool) -> Result<Vec<Value>, DocSyncError> {
    // Decode once to reject malformed documents before rewriting them
    let _: CustomCalendarDocument = serde_json::from_value(calendar.clone())?;

    let events = match calendar {
        Value::Object(mut map) => match map.remove("events") {
            Some(Value::Array(events)) => events,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    Ok(events
        .into_iter()
        .filter(|e| e.get("ticker").and_then(Value::as_str).map_or(true, &keep))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker("  nvda "), Some("NVDA".to_string()));
        assert_eq!(normalize_ticker("   "), None);
    }

    #[test]
    fn test_retained_events_keeps_unknown_fields() {
        let calendar = json!({"events": [
            {"ticker": "AAPL", "title": "a", "timestamp": 1, "note": "x"},
            {"ticker": "TSLA", "title": "t", "timestamp": 2}
        ]});
        let kept = retained_events(calendar, |t| t != "TSLA").unwrap();
        assert_eq!(kept, vec![json!({"ticker": "AAPL", "title": "a", "timestamp": 1, "note": "x"})]);
    }

    #[test]
    fn test_retained_events_rejects_malformed() {
        let err = retained_events(json!({"events": "nope"}), |_| true).unwrap_err();
        assert!(matches!(err, DocSyncError::Serialization(_)));
    }
}
