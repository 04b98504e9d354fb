//! Domain Layer
//!
//! Document payloads, sentiment rules and the dashboard store.
//! This layer has no dependencies on infrastructure or application layers.

pub mod models;
pub mod sentiment;
pub mod store;

pub use models::{
    day_label, financials_url, time_label, CustomCalendarDocument, CustomEvent, MacroDocument,
    MacroEvent, NewsArticle, NewsDocument, WatchlistDocument,
};
pub use sentiment::{Impact, ScoreTier, SentimentTotals, BEARISH_MARKER, BULLISH_MARKER};
pub use store::{
    ConnectionStatus, DocumentKind, NewsFilter, SnapshotError, Store, Tab, DEFAULT_COLLECTION,
};
