//! Symbol Search
//!
//! Debounced ticker lookup feeding the subscription modal. Each call to
//! `schedule` aborts the pending lookup and bumps the generation; results
//! of older generations are discarded when polled.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::infrastructure::client::{SearchError, SymbolCandidate, SymbolSearch};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Uppercased and trimmed
pub fn normalize_query(input: &str) -> String {
    input.trim().to_uppercase()
}

pub fn accept(candidates: Vec<SymbolCandidate>) -> Vec<SymbolCandidate> {
    candidates.into_iter().filter(SymbolCandidate::is_accepted).collect()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SuggestionState {
    #[default]
    Hidden,
    /// Lookup pending
    Validating,
    Matches(Vec<SymbolCandidate>),
    NoMatch,
    /// Search unreachable; manual entry is still allowed
    Degraded(String),
}

impl SuggestionState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, SuggestionState::Hidden)
    }

    pub fn from_result(result: Result<Vec<SymbolCandidate>, SearchError>) -> Self {
        match result {
            Ok(candidates) => {
                let accepted = accept(candidates);
                if accepted.is_empty() {
                    SuggestionState::NoMatch
                } else {
                    SuggestionState::Matches(accepted)
                }
            }
            Err(e) => SuggestionState::Degraded(e.to_string()),
        }
    }
}

struct SearchOutcome {
    generation: u64,
    state: SuggestionState,
}

pub struct SearchDebouncer {
    search: Arc<dyn SymbolSearch>,
    runtime: Handle,
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    tx: Sender<SearchOutcome>,
    rx: Receiver<SearchOutcome>,
}

impl SearchDebouncer {
    pub fn new(search: Arc<dyn SymbolSearch>, runtime: Handle, delay: Duration) -> Self {
        let (tx, rx) = unbounded();
        Self {
            search,
            runtime,
            delay,
            generation: 0,
            pending: None,
            tx,
            rx,
        }
    }

    /// Start a lookup after the settle delay, superseding any pending one
    pub fn schedule(&mut self, query: String) -> u64 {
        self.abort_pending();
        self.generation += 1;

        let generation = self.generation;
        let search = Arc::clone(&self.search);
        let tx = self.tx.clone();
        let delay = self.delay;

        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("[Search] Looking up {} (generation {})", query, generation);
            let result = search.search(&query).await;
            if let Err(e) = &result {
                warn!("[Search] Lookup for {} failed: {}", query, e);
            }
            let _ = tx.send(SearchOutcome {
                generation,
                state: SuggestionState::from_result(result),
            });
        }));

        generation
    }

    /// Drop any pending lookup and invalidate in-flight results
    pub fn cancel(&mut self) {
        self.abort_pending();
        self.generation += 1;
    }

    fn abort_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Latest result of the current generation, if one has arrived
    pub fn poll(&mut self) -> Option<SuggestionState> {
        let mut latest = None;
        for outcome in self.rx.try_iter() {
            if outcome.generation == self.generation {
                latest = Some(outcome.state);
            }
        }
        if latest.is_some() {
            self.pending = None;
        }
        latest
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.abort_pending();
    }
}
