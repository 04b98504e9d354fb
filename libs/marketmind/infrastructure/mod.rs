//! Infrastructure Layer
//!
//! Configuration, logging, document backends, local preferences and the
//! symbol search client. Depends on the domain layer only.

pub mod client;
pub mod config;
pub mod documents;
pub mod logging;
pub mod preferences;
pub mod shutdown;

pub use client::{SearchError, SymbolCandidate, SymbolSearch, YahooSearchClient};
pub use config::{ConfigError, DashboardConfig, DocumentBackend, DocumentsConfig, SearchConfig, WindowsConfig};
pub use documents::{open_document_source, seed_memory_source};
pub use logging::{init_file_tracing, init_tracing_with_level};
pub use preferences::{JsonFileStore, KeyValueStore, MemoryStore, PreferenceError, SELECTED_MACRO_KEY};
pub use shutdown::ShutdownManager;
