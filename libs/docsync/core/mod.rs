//! # DocSync Core
//!
//! Subscription handle, merge semantics and the two bundled backends:
//!
//! - **memory**: in-process documents, synchronous fan-out on write
//! - **file**: one JSON file per document, polled by a watcher task

pub mod file;
pub mod memory;
pub mod merge;
pub mod subscription;

pub use file::{FileDocumentSource, FileSourceConfig};
pub use memory::MemoryDocumentSource;
pub use merge::apply_write;
pub use subscription::Subscription;
