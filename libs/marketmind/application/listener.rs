//! Listener Layer
//!
//! One persistent subscription per dashboard document. Events are drained
//! by the UI loop and applied to the store there, so the loop stays the
//! only writer.

use docsync::{DocSyncError, DocumentEvent, DocumentSource, Subscription};
use tracing::{error, info, warn};

use crate::domain::{DocumentKind, Store};

/// Effect of one delivered event on the store
#[derive(Debug, Clone, PartialEq)]
pub enum ListenerOutcome {
    /// Absent document, malformed payload or transient error
    Unchanged,
    /// Field replaced; re-render
    Updated(DocumentKind),
    /// Store moved to the error state
    Fatal,
}

pub struct ListenerLayer {
    subscriptions: Vec<(DocumentKind, Subscription)>,
}

impl ListenerLayer {
    /// Subscribe to all four documents of `collection`
    pub async fn attach(source: &dyn DocumentSource, collection: &str) -> Result<Self, DocSyncError> {
        let mut subscriptions = Vec::with_capacity(DocumentKind::ALL.len());
        for kind in DocumentKind::ALL {
            let path = kind.path(collection);
            let subscription = source.subscribe(&path).await?;
            info!("[Listener] Subscribed to {} via {}", path, source.name());
            subscriptions.push((kind, subscription));
        }
        Ok(Self { subscriptions })
    }

    /// Every event delivered since the last drain, per document in order
    pub fn drain(&self) -> Vec<(DocumentKind, DocumentEvent)> {
        self.subscriptions
            .iter()
            .flat_map(|(kind, sub)| sub.drain().into_iter().map(move |event| (*kind, event)))
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.subscriptions.iter().filter(|(_, s)| s.is_active()).count()
    }

    pub fn close(&mut self) {
        for (_, subscription) in &mut self.subscriptions {
            subscription.close();
        }
        info!("[Listener] Closed {} subscriptions", self.subscriptions.len());
    }
}

/// Apply one delivered event to the store
pub fn apply_event(store: &mut Store, kind: DocumentKind, event: DocumentEvent) -> ListenerOutcome {
    match event {
        DocumentEvent::Snapshot(None) => ListenerOutcome::Unchanged,
        DocumentEvent::Snapshot(Some(payload)) => match store.apply_snapshot(kind, payload) {
            Ok(()) => {
                store.mark_synced();
                ListenerOutcome::Updated(kind)
            }
            Err(e) => {
                warn!("[Listener] Ignoring snapshot: {}", e);
                ListenerOutcome::Unchanged
            }
        },
        DocumentEvent::Error(e) if e.is_not_found() || matches!(e, DocSyncError::ReconnectionFailed { .. }) => {
            error!("[Listener] {} subscription failed: {}", kind.name(), e);
            store.enter_error_state(e.to_string());
            ListenerOutcome::Fatal
        }
        DocumentEvent::Error(e) => {
            warn!("[Listener] {} subscription degraded: {}", kind.name(), e);
            ListenerOutcome::Unchanged
        }
    }
}
