//! # DocSync
//!
//! Realtime document subscriptions with push-based change notification.
//!
//! A [`DocumentSource`] exposes JSON documents addressed by
//! `collection/document` paths. Every subscription delivers the current
//! snapshot first and then one [`DocumentEvent`] per change, over an
//! unbounded crossbeam channel so that a synchronous UI loop can drain it
//! without awaiting.
//!
//! - **Lock-free delivery**: producers never block on slow consumers
//! - **Merge writes**: set, array-union and array-remove field operations
//! - **Self-healing watchers**: reconnection is owned by the source, driven
//!   by a pluggable [`ReconnectPolicy`]

pub mod traits;
pub mod core;

// Re-export all traits
pub use traits::*;

// Re-export core sources
pub use core::{
    file::{FileDocumentSource, FileSourceConfig},
    memory::MemoryDocumentSource,
    merge::apply_write,
    subscription::Subscription,
};

/// Type alias for Result with DocSyncError
pub type Result<T> = std::result::Result<T, traits::DocSyncError>;
