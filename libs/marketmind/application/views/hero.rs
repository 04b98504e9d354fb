//! Featured macro event

use super::countdown::RELEASED;
use crate::application::scheduler::Countdown;
use crate::domain::{day_label, MacroEvent};

pub const EMPTY_PLACEHOLDER: &str = "No data yet";
pub const NO_ANALYSIS: &str = "No detailed analysis";
const MISSING: &str = "--";

/// Entry of the macro selector
#[derive(Debug, Clone, PartialEq)]
pub struct MacroOption {
    /// `timestamp|title`
    pub key: String,
    /// `MM-DD - title`
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroStatus {
    Upcoming,
    /// Already past when rendered; no countdown runs
    Released,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeroCard {
    pub key: String,
    pub title: String,
    pub previous: String,
    pub forecast: String,
    pub actual: String,
    pub analysis: String,
    pub timestamp: f64,
    pub status: HeroStatus,
    pub options: Vec<MacroOption>,
    /// Index into `options` of the featured event
    pub selected: usize,
}

impl HeroCard {
    pub fn released_label(&self) -> Option<&'static str> {
        match self.status {
            HeroStatus::Released => Some(RELEASED),
            HeroStatus::Upcoming => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum HeroView {
    #[default]
    Placeholder,
    Featured(HeroCard),
}

/// Default featured event.
///
/// First upcoming event; if it is more than `lookahead_secs` away and not
/// the first in the list, the one before it; with nothing upcoming, the
/// last event.
pub fn default_featured_index(events: &[MacroEvent], now: f64, lookahead_secs: f64) -> Option<usize> {
    if events.is_empty() {
        return None;
    }

    match events.iter().position(|e| e.timestamp > now) {
        None => Some(events.len() - 1),
        Some(next) if next > 0 && events[next].timestamp - now > lookahead_secs => Some(next - 1),
        Some(next) => Some(next),
    }
}

/// Saved selection when it still matches an event, else the default policy
pub fn select_featured(
    events: &[MacroEvent],
    saved_key: Option<&str>,
    now: f64,
    lookahead_secs: f64,
) -> Option<usize> {
    saved_key
        .and_then(|key| events.iter().position(|e| e.key() == key))
        .or_else(|| default_featured_index(events, now, lookahead_secs))
}

pub fn macro_options(events: &[MacroEvent]) -> Vec<MacroOption> {
    events
        .iter()
        .map(|e| MacroOption {
            key: e.key(),
            label: format!(
                "{} - {}",
                day_label(&e.date).unwrap_or_else(|| MISSING.to_string()),
                e.title
            ),
        })
        .collect()
}

/// Build the hero card and the single countdown it drives, if any
pub fn render_hero(
    events: &[MacroEvent],
    saved_key: Option<&str>,
    now: f64,
    lookahead_secs: f64,
) -> (HeroView, Option<Countdown>) {
    let Some(index) = select_featured(events, saved_key, now, lookahead_secs) else {
        return (HeroView::Placeholder, None);
    };

    let event = &events[index];
    let or_missing = |v: &Option<String>| {
        v.as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(MISSING)
            .to_string()
    };

    let status = if event.timestamp <= now {
        HeroStatus::Released
    } else {
        HeroStatus::Upcoming
    };

    let card = HeroCard {
        key: event.key(),
        title: event.title.clone(),
        previous: or_missing(&event.previous),
        forecast: or_missing(&event.forecast),
        actual: or_missing(&event.actual),
        analysis: event
            .analysis
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NO_ANALYSIS.to_string()),
        timestamp: event.timestamp,
        status,
        options: macro_options(events),
        selected: index,
    };

    let countdown = match status {
        HeroStatus::Upcoming => Some(Countdown::hero(event.timestamp)),
        HeroStatus::Released => None,
    };

    (HeroView::Featured(card), countdown)
}
