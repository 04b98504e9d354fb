//! Document source factory

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use docsync::{Backoff, DocumentSource, FileDocumentSource, FileSourceConfig, MemoryDocumentSource};
use serde_json::Value;
use tracing::{info, warn};

use super::config::{DocumentBackend, DocumentsConfig};
use crate::domain::DocumentKind;

/// Build the configured backend
pub fn open_document_source(config: &DocumentsConfig) -> Arc<dyn DocumentSource> {
    match config.backend {
        DocumentBackend::File => {
            let reconnect = Backoff::new(
                Duration::from_millis(config.reconnect.initial_delay_ms),
                Duration::from_millis(config.reconnect.max_delay_ms),
                config.reconnect.max_attempts,
            );
            let source = FileDocumentSource::new(
                FileSourceConfig::new(&config.root)
                    .with_poll_interval(config.poll_interval())
                    .with_reconnect(Arc::new(reconnect)),
            );
            info!("[Documents] File backend at {}", config.root.display());
            Arc::new(source)
        }
        DocumentBackend::Memory => {
            let source = seed_memory_source(&config.root, &config.collection);
            info!("[Documents] Memory backend seeded from {}", config.root.display());
            Arc::new(source)
        }
    }
}

/// In-memory source preloaded with whatever dashboard documents exist on disk
pub fn seed_memory_source(root: &Path, collection: &str) -> MemoryDocumentSource {
    let mut source = MemoryDocumentSource::new();
    for kind in DocumentKind::ALL {
        let path = kind.path(collection);
        let file = root.join(format!("{}.json", path));
        let Ok(content) = fs::read_to_string(&file) else {
            continue;
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(value) => source = source.with_document(path, value),
            Err(e) => warn!("[Documents] Skipping {}: {}", file.display(), e),
        }
    }
    source
}
