use crate::traits::DocumentEvent;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Live subscription to one document
///
/// Dropping the subscription stops its watcher.
pub struct Subscription {
    path: String,
    events: Receiver<DocumentEvent>,
    /// true = keep watching, false = closed
    active: Arc<AtomicBool>,
    /// Watcher task for polling backends
    task: Option<tokio::task::JoinHandle<()>>,
}

impl Subscription {
    pub(crate) fn new(
        path: impl Into<String>,
        events: Receiver<DocumentEvent>,
        active: Arc<AtomicBool>,
        task: Option<tokio::task::JoinHandle<()>>,
    ) -> Self {
        Self {
            path: path.into(),
            events,
            active,
            task,
        }
    }

    /// Document path this subscription watches
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Next pending event without waiting
    pub fn try_next(&self) -> Option<DocumentEvent> {
        self.events.try_recv().ok()
    }

    /// All pending events, oldest first
    pub fn drain(&self) -> Vec<DocumentEvent> {
        self.events.try_iter().collect()
    }

    /// Block the current thread until an event arrives or the timeout passes
    pub fn recv_timeout(&self, timeout: Duration) -> Option<DocumentEvent> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Stop watching
    pub fn close(&mut self) {
        self.active.store(false, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("path", &self.path)
            .field("active", &self.is_active())
            .field("pending", &self.events.len())
            .finish()
    }
}
