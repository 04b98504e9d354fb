//! # DocSync Traits
//!
//! Core contracts shared by every document backend:
//!
//! - **DocumentSource**: subscribe, read and merge-write documents
//! - **ReconnectPolicy**: how long a watcher waits before retrying
//! - **DocSyncError**: the error taxonomy surfaced to subscribers

pub mod error;
pub mod reconnect;
pub mod source;

pub use error::{DocSyncError, Result};
pub use reconnect::{Backoff, FixedDelay, NoReconnect, ReconnectPolicy};
pub use source::{validate_path, DocumentEvent, DocumentSource, DocumentWrite, FieldWrite};
