//! Subscription modal state
//!
//! Pure state machine; the dashboard wires `SearchRequest`s to the
//! debouncer and feeds results back through `apply_suggestions`.

use super::search::{normalize_query, SuggestionState};
use crate::infrastructure::client::SymbolCandidate;

/// What the caller should do with the search after an input change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    Schedule(String),
    Cancel,
}

#[derive(Debug, Clone, Default)]
pub struct SubscriptionModal {
    open: bool,
    input: String,
    suggestions: SuggestionState,
    highlighted: usize,
}

impl SubscriptionModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close and reset input and suggestions
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &SuggestionState {
        &self.suggestions
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Save is enabled for any non-blank input, matched or not
    pub fn can_save(&self) -> bool {
        !normalize_query(&self.input).is_empty()
    }

    pub fn set_input(&mut self, value: impl Into<String>) -> SearchRequest {
        self.input = value.into();
        self.highlighted = 0;

        let query = normalize_query(&self.input);
        if query.is_empty() {
            self.suggestions = SuggestionState::Hidden;
            SearchRequest::Cancel
        } else {
            self.suggestions = SuggestionState::Validating;
            SearchRequest::Schedule(query)
        }
    }

    pub fn push_char(&mut self, c: char) -> SearchRequest {
        let mut value = self.input.clone();
        value.push(c);
        self.set_input(value)
    }

    pub fn backspace(&mut self) -> SearchRequest {
        let mut value = self.input.clone();
        value.pop();
        self.set_input(value)
    }

    /// Results arriving after the suggestions were hidden are dropped
    pub fn apply_suggestions(&mut self, state: SuggestionState) {
        if self.open && self.suggestions.is_visible() {
            self.suggestions = state;
            self.highlighted = 0;
        }
    }

    fn matches(&self) -> &[SymbolCandidate] {
        match &self.suggestions {
            SuggestionState::Matches(candidates) => candidates,
            _ => &[],
        }
    }

    pub fn highlight_next(&mut self) {
        let len = self.matches().len();
        if len > 0 {
            self.highlighted = (self.highlighted + 1) % len;
        }
    }

    pub fn highlight_prev(&mut self) {
        let len = self.matches().len();
        if len > 0 {
            self.highlighted = (self.highlighted + len - 1) % len;
        }
    }

    /// Fill the input with a suggestion and hide the list
    pub fn select(&mut self, index: usize) -> bool {
        let Some(symbol) = self.matches().get(index).map(|c| c.symbol.clone()) else {
            return false;
        };
        self.input = symbol;
        self.suggestions = SuggestionState::Hidden;
        self.highlighted = 0;
        true
    }

    pub fn select_highlighted(&mut self) -> bool {
        self.select(self.highlighted)
    }
}
