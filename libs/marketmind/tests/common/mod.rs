//! Common test utilities for marketmind integration tests
//!
//! Fixtures for dashboard documents, an in-memory document source seeded
//! with them and a canned symbol search.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use docsync::MemoryDocumentSource;
use marketmind::domain::{DocumentKind, DEFAULT_COLLECTION};
use marketmind::infrastructure::{SearchError, SymbolCandidate, SymbolSearch};
use serde_json::{json, Value};

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

/// Fixed wall clock used by every fixture
pub const NOW: f64 = 1_736_900_000.0;
pub const DAY: f64 = 86_400.0;

pub fn fixed_now() -> f64 {
    NOW
}

pub fn path(kind: DocumentKind) -> String {
    kind.path(DEFAULT_COLLECTION)
}

pub mod fixtures {
    //! Raw document payloads as the producer writes them

    use super::*;

    pub fn macro_event(timestamp: f64, title: &str) -> Value {
        json!({
            "timestamp": timestamp,
            "date": "2025-01-15 21:30 (SGT)",
            "title": title,
            "previous": "2.9%",
            "forecast": "3.0%",
            "actual": null,
            "analysis": "Core inflation in focus"
        })
    }

    pub fn article(title: &str, score: f64, impact: &str) -> Value {
        json!({
            "title": title,
            "impact": impact,
            "score": score,
            "reason": "Scored upstream",
            "link": "https://example.com/news"
        })
    }

    pub fn custom_event(ticker: &str, timestamp: f64) -> Value {
        json!({
            "ticker": ticker,
            "title": format!("{} Earnings", ticker),
            "date": "2025-01-20 05:00",
            "timestamp": timestamp,
            "type": "custom"
        })
    }

    pub fn macro_doc(events: Vec<Value>) -> Value {
        json!({"events": events, "last_updated": "2025-01-15 08:05"})
    }

    pub fn news_doc(articles: Vec<Value>) -> Value {
        json!({ "articles": articles })
    }

    pub fn calendar_doc(events: Vec<Value>) -> Value {
        json!({ "events": events })
    }

    pub fn watchlist_doc(tickers: &[&str]) -> Value {
        json!({ "tickers": tickers })
    }
}

/// Source holding all four documents
pub fn seeded_source(
    macros: Vec<Value>,
    articles: Vec<Value>,
    custom: Vec<Value>,
    watchlist: &[&str],
) -> MemoryDocumentSource {
    MemoryDocumentSource::new()
        .with_document(path(DocumentKind::Macro), fixtures::macro_doc(macros))
        .with_document(path(DocumentKind::News), fixtures::news_doc(articles))
        .with_document(path(DocumentKind::CustomCalendar), fixtures::calendar_doc(custom))
        .with_document(path(DocumentKind::Watchlist), fixtures::watchlist_doc(watchlist))
}

/// Symbol search answering from a fixed list
#[derive(Default)]
pub struct StaticSearch {
    pub candidates: Vec<SymbolCandidate>,
    pub offline: bool,
    pub calls: AtomicUsize,
}

impl StaticSearch {
    pub fn with_symbols(symbols: &[(&str, &str, &str)]) -> Self {
        Self {
            candidates: symbols
                .iter()
                .map(|(symbol, name, quote_type)| SymbolCandidate {
                    symbol: symbol.to_string(),
                    shortname: Some(name.to_string()),
                    quote_type: quote_type.to_string(),
                    is_yahoo_finance: true,
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SymbolSearch for StaticSearch {
    async fn search(&self, query: &str) -> Result<Vec<SymbolCandidate>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(SearchError::RequestFailed("network unreachable".to_string()));
        }
        Ok(self
            .candidates
            .iter()
            .filter(|c| c.symbol.starts_with(query))
            .cloned()
            .collect())
    }
}
