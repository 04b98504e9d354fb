//! Merged 30-day calendar with pending subscriptions

use crate::domain::{day_label, time_label, CustomEvent, MacroEvent, Store};

pub const CALENDAR_EMPTY: &str = "No key events in the coming month";
const MISSING: &str = "--";

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarRow {
    /// Watchlist ticker whose earnings date has not been confirmed yet
    Pending { ticker: String },
    Macro {
        day_label: String,
        time_label: String,
        title: String,
        previous: String,
        forecast: String,
        timestamp: f64,
    },
    Custom {
        day_label: String,
        time_label: String,
        title: String,
        ticker: String,
        financials_url: String,
        timestamp: f64,
    },
}

impl CalendarRow {
    /// Ticker the row can be unsubscribed by
    pub fn unsubscribe_target(&self) -> Option<&str> {
        match self {
            CalendarRow::Pending { ticker } | CalendarRow::Custom { ticker, .. } => Some(ticker),
            CalendarRow::Macro { .. } => None,
        }
    }

    fn timestamp(&self) -> f64 {
        match self {
            CalendarRow::Pending { .. } => f64::NEG_INFINITY,
            CalendarRow::Macro { timestamp, .. } | CalendarRow::Custom { timestamp, .. } => *timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalendarView {
    pub rows: Vec<CalendarRow>,
}

impl CalendarView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r, CalendarRow::Pending { .. }))
            .count()
    }

    pub fn ready_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r, CalendarRow::Custom { .. }))
            .count()
    }
}

fn labels(date: &str) -> (String, String) {
    (
        day_label(date).unwrap_or_else(|| MISSING.to_string()),
        time_label(date).unwrap_or_else(|| MISSING.to_string()),
    )
}

fn macro_row(e: &MacroEvent) -> CalendarRow {
    let (day_label, time_label) = labels(&e.date);
    CalendarRow::Macro {
        day_label,
        time_label,
        title: e.title.clone(),
        previous: e.previous.clone().unwrap_or_else(|| MISSING.to_string()),
        forecast: e.forecast.clone().unwrap_or_else(|| MISSING.to_string()),
        timestamp: e.timestamp,
    }
}

fn custom_row(e: &CustomEvent) -> CalendarRow {
    let (day_label, time_label) = labels(&e.date);
    CalendarRow::Custom {
        day_label,
        time_label,
        title: e.title.clone(),
        ticker: e.ticker.clone(),
        financials_url: e.financials_url(),
        timestamp: e.timestamp,
    }
}

/// Watchlist tickers without any custom event
pub fn pending_tickers(store: &Store) -> Vec<&str> {
    store
        .watchlist
        .iter()
        .filter(|t| !store.custom_events.iter().any(|e| &e.ticker == *t))
        .map(String::as_str)
        .collect()
}

/// Pending rows first, then macro and custom events in `[now, now + horizon]`
pub fn render_calendar(store: &Store, now: f64, horizon_secs: f64) -> CalendarView {
    let in_window = |ts: f64| ts >= now && ts <= now + horizon_secs;

    let mut merged: Vec<CalendarRow> = store
        .macro_events
        .iter()
        .filter(|e| in_window(e.timestamp))
        .map(macro_row)
        .chain(
            store
                .custom_events
                .iter()
                .filter(|e| in_window(e.timestamp))
                .map(custom_row),
        )
        .collect();
    // Stable: macro rows stay ahead of custom rows at the same instant
    merged.sort_by(|a, b| a.timestamp().total_cmp(&b.timestamp()));

    let mut rows: Vec<CalendarRow> = pending_tickers(store)
        .into_iter()
        .map(|ticker| CalendarRow::Pending {
            ticker: ticker.to_string(),
        })
        .collect();
    rows.extend(merged);

    CalendarView { rows }
}
