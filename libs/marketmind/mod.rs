//! MarketMind
//!
//! Realtime market dashboard: macro releases, scored news sentiment and
//! earnings countdowns for a user watchlist.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{RenderOrchestrator, ViewWindows, WriteCommands};
pub use domain::{DocumentKind, Store};
pub use infrastructure::{DashboardConfig, ShutdownManager};
