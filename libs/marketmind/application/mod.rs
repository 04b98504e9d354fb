//! Application Layer
//!
//! Listener wiring, render pipeline, countdowns, write commands, symbol
//! search and the terminal dashboard.
//! This layer depends on domain and infrastructure layers.

pub mod commands;
pub mod dashboard;
pub mod listener;
pub mod modal;
pub mod scheduler;
pub mod search;
pub mod views;

pub use commands::{normalize_ticker, CommandError, Confirmation, UnsubscribeOutcome, WriteCommands};
pub use listener::{apply_event, ListenerLayer, ListenerOutcome};
pub use modal::{SearchRequest, SubscriptionModal};
pub use scheduler::{epoch_seconds_now, Countdown, CountdownScheduler, CountdownState, Tick, TimerId};
pub use search::{normalize_query, SearchDebouncer, SuggestionState};
pub use views::{RenderOrchestrator, RenderedViews, ViewWindows};
