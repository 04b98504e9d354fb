//! In-process document store
//!
//! Writes are applied and fanned out synchronously, which makes this backend
//! deterministic enough for tests and demos.

use crate::core::merge::apply_write;
use crate::core::subscription::Subscription;
use crate::traits::{validate_path, DocSyncError, DocumentEvent, DocumentSource, DocumentWrite, Result};
use async_trait::async_trait;
use crossbeam_channel::{unbounded, Sender};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Default)]
struct MemoryInner {
    documents: RwLock<HashMap<String, Value>>,
    subscribers: RwLock<HashMap<String, Vec<Sender<DocumentEvent>>>>,
    /// Paths whose writes fail with the stored error
    rejected_writes: RwLock<HashMap<String, DocSyncError>>,
    write_count: AtomicU64,
}

/// Shared in-memory document source
///
/// Cloning yields another handle to the same documents.
#[derive(Clone, Default)]
pub struct MemoryDocumentSource {
    inner: Arc<MemoryInner>,
}

impl MemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seed, does not notify (no subscribers exist yet)
    pub fn with_document(self, path: impl Into<String>, value: Value) -> Self {
        self.inner.documents.write().insert(path.into(), value);
        self
    }

    /// Replace a document and notify its subscribers
    pub fn insert(&self, path: &str, value: Value) {
        self.inner
            .documents
            .write()
            .insert(path.to_string(), value.clone());
        self.publish(path, DocumentEvent::Snapshot(Some(value)));
    }

    /// Delete a document and notify its subscribers
    pub fn remove(&self, path: &str) {
        self.inner.documents.write().remove(path);
        self.publish(path, DocumentEvent::Snapshot(None));
    }

    /// Push an error to every subscriber of a document
    pub fn fail(&self, path: &str, error: DocSyncError) {
        self.publish(path, DocumentEvent::Error(error));
    }

    /// Make every subsequent write to `path` fail with `error`
    pub fn reject_writes(&self, path: &str, error: DocSyncError) {
        self.inner
            .rejected_writes
            .write()
            .insert(path.to_string(), error);
    }

    /// Current contents of a document
    pub fn document(&self, path: &str) -> Option<Value> {
        self.inner.documents.read().get(path).cloned()
    }

    /// Number of successful writes applied so far
    pub fn write_count(&self) -> u64 {
        self.inner.write_count.load(Ordering::Acquire)
    }

    /// Number of live subscribers for a document
    pub fn subscriber_count(&self, path: &str) -> usize {
        self.inner
            .subscribers
            .read()
            .get(path)
            .map(|senders| senders.len())
            .unwrap_or(0)
    }

    fn publish(&self, path: &str, event: DocumentEvent) {
        let mut subscribers = self.inner.subscribers.write();
        if let Some(senders) = subscribers.get_mut(path) {
            // Disconnected receivers are pruned on the way
            senders.retain(|tx| tx.send(event.clone()).is_ok());
            debug!("[DocSync] Published {} to {} subscribers", path, senders.len());
        }
    }
}

#[async_trait]
impl DocumentSource for MemoryDocumentSource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn subscribe(&self, path: &str) -> Result<Subscription> {
        validate_path(path)?;

        let (tx, rx) = unbounded();
        let current = self.document(path);
        // Receiver is alive, initial send cannot fail
        let _ = tx.send(DocumentEvent::Snapshot(current));

        self.inner
            .subscribers
            .write()
            .entry(path.to_string())
            .or_default()
            .push(tx);

        Ok(Subscription::new(
            path,
            rx,
            Arc::new(AtomicBool::new(true)),
            None,
        ))
    }

    async fn get(&self, path: &str) -> Result<Option<Value>> {
        validate_path(path)?;
        Ok(self.document(path))
    }

    async fn write(&self, path: &str, write: DocumentWrite) -> Result<()> {
        validate_path(path)?;

        if let Some(error) = self.inner.rejected_writes.read().get(path) {
            return Err(error.clone());
        }

        let updated = {
            let mut documents = self.inner.documents.write();
            let updated = apply_write(documents.get(path).cloned(), &write)?;
            documents.insert(path.to_string(), updated.clone());
            updated
        };

        self.inner.write_count.fetch_add(1, Ordering::AcqRel);
        self.publish(path, DocumentEvent::Snapshot(Some(updated)));
        Ok(())
    }
}
