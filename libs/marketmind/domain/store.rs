//! Dashboard state container
//!
//! Holds the latest snapshot of each remote document together with the
//! UI-only state. Every snapshot replaces its field wholesale; there are no
//! partial updates.

use serde_json::Value;
use thiserror::Error;

use super::models::{
    CustomCalendarDocument, CustomEvent, MacroDocument, MacroEvent, NewsArticle, NewsDocument,
    WatchlistDocument,
};

/// Collection holding the four dashboard documents
pub const DEFAULT_COLLECTION: &str = "market_data";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("Malformed {document} document: {reason}")]
    Malformed {
        document: &'static str,
        reason: String,
    },
}

/// The four remote documents the dashboard listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Macro,
    News,
    CustomCalendar,
    Watchlist,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Macro,
        DocumentKind::News,
        DocumentKind::CustomCalendar,
        DocumentKind::Watchlist,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::Macro => "macro",
            DocumentKind::News => "news",
            DocumentKind::CustomCalendar => "custom_calendar",
            DocumentKind::Watchlist => "watchlist",
        }
    }

    /// `<collection>/<name>`
    pub fn path(self, collection: &str) -> String {
        format!("{}/{}", collection, self.name())
    }

    fn index(self) -> usize {
        match self {
            DocumentKind::Macro => 0,
            DocumentKind::News => 1,
            DocumentKind::CustomCalendar => 2,
            DocumentKind::Watchlist => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Calendar,
    News,
    Error,
}

impl Tab {
    /// Tabs reachable by the user; `Error` is entered only on failure
    pub const NAVIGABLE: [Tab; 3] = [Tab::Dashboard, Tab::Calendar, Tab::News];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Calendar => "Calendar",
            Tab::News => "Intelligence",
            Tab::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsFilter {
    #[default]
    All,
    Bullish,
    Bearish,
}

impl NewsFilter {
    pub fn next(self) -> Self {
        match self {
            NewsFilter::All => NewsFilter::Bullish,
            NewsFilter::Bullish => NewsFilter::Bearish,
            NewsFilter::Bearish => NewsFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NewsFilter::All => "All",
            NewsFilter::Bullish => "Bullish",
            NewsFilter::Bearish => "Bearish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Synced,
    Failed,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting",
            ConnectionStatus::Synced => "Synced",
            ConnectionStatus::Failed => "Connection failed",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    pub macro_events: Vec<MacroEvent>,
    pub news_articles: Vec<NewsArticle>,
    pub custom_events: Vec<CustomEvent>,
    pub watchlist: Vec<String>,
    pub last_updated: Option<String>,
    pub active_tab: Tab,
    pub news_filter: NewsFilter,
    /// Persisted `timestamp|title` of the user's featured macro event
    pub selected_macro_key: Option<String>,
    pub connection: ConnectionStatus,
    /// Message shown on the error panel
    pub error: Option<String>,
    received: [bool; 4],
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selected_macro_key(mut self, key: Option<String>) -> Self {
        self.selected_macro_key = key;
        self
    }

    /// Replace the field backing `kind` with a decoded snapshot.
    ///
    /// A payload that fails to decode leaves the store untouched.
    pub fn apply_snapshot(&mut self, kind: DocumentKind, payload: Value) -> Result<(), SnapshotError> {
        let malformed = |e: serde_json::Error| SnapshotError::Malformed {
            document: kind.name(),
            reason: e.to_string(),
        };

        match kind {
            DocumentKind::Macro => {
                let doc: MacroDocument = serde_json::from_value(payload).map_err(malformed)?;
                self.macro_events = doc.events;
                self.last_updated = doc.last_updated;
            }
            DocumentKind::News => {
                let doc: NewsDocument = serde_json::from_value(payload).map_err(malformed)?;
                self.news_articles = doc.articles;
            }
            DocumentKind::CustomCalendar => {
                let doc: CustomCalendarDocument =
                    serde_json::from_value(payload).map_err(malformed)?;
                self.custom_events = doc.events;
            }
            DocumentKind::Watchlist => {
                let doc: WatchlistDocument = serde_json::from_value(payload).map_err(malformed)?;
                self.watchlist = doc.tickers;
            }
        }

        self.received[kind.index()] = true;
        Ok(())
    }

    pub fn has_received(&self, kind: DocumentKind) -> bool {
        self.received[kind.index()]
    }

    /// Mark the first successful sync
    pub fn mark_synced(&mut self) {
        if self.connection == ConnectionStatus::Connecting {
            self.connection = ConnectionStatus::Synced;
        }
    }

    /// Fatal fallback: hide every view behind the error panel
    pub fn enter_error_state(&mut self, message: impl Into<String>) {
        self.active_tab = Tab::Error;
        self.connection = ConnectionStatus::Failed;
        self.error = Some(message.into());
    }

    pub fn is_error(&self) -> bool {
        self.active_tab == Tab::Error
    }

    /// Switch tabs; the error state is terminal
    pub fn set_tab(&mut self, tab: Tab) {
        if !self.is_error() && tab != Tab::Error {
            self.active_tab = tab;
        }
    }

    /// Time part of `last_updated` ("2025-01-15 21:30" -> "21:30")
    pub fn last_updated_clock(&self) -> Option<&str> {
        self.last_updated
            .as_deref()
            .and_then(|s| s.split(' ').nth(1))
            .filter(|s| !s.is_empty())
    }
}
