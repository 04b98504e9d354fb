//! Terminal dashboard
//!
//! Binds the view models to ratatui widgets. The binary owns the terminal
//! and the poll loop; `App` owns the store and every collaborator.

pub mod app;
pub mod ui;

pub use app::{App, AppOptions};
