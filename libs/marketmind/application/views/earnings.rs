//! Upcoming earnings slider

use crate::application::scheduler::{Countdown, TimerId};
use crate::domain::{day_label, CustomEvent};

#[derive(Debug, Clone, PartialEq)]
pub struct EarningsItem {
    pub timer: TimerId,
    pub ticker: String,
    pub title: String,
    pub day_label: String,
    pub timestamp: f64,
    pub financials_url: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EarningsSlider {
    pub items: Vec<EarningsItem>,
}

impl EarningsSlider {
    pub fn is_hidden(&self) -> bool {
        self.items.is_empty()
    }
}

/// Custom events in `(now, now + horizon]`, ascending, with one countdown each
pub fn render_earnings(
    events: &[CustomEvent],
    now: f64,
    horizon_secs: f64,
) -> (EarningsSlider, Vec<Countdown>) {
    let mut upcoming: Vec<&CustomEvent> = events
        .iter()
        .filter(|e| e.timestamp > now && e.timestamp <= now + horizon_secs)
        .collect();
    upcoming.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    let items: Vec<EarningsItem> = upcoming
        .into_iter()
        .enumerate()
        .map(|(index, e)| EarningsItem {
            timer: TimerId::Earnings(index),
            ticker: e.ticker.clone(),
            title: e.title.clone(),
            day_label: day_label(&e.date).unwrap_or_default(),
            timestamp: e.timestamp,
            financials_url: e.financials_url(),
        })
        .collect();

    let countdowns = items
        .iter()
        .enumerate()
        .map(|(index, item)| Countdown::earnings(index, item.timestamp))
        .collect();

    (EarningsSlider { items }, countdowns)
}
