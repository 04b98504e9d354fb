use crate::core::subscription::Subscription;
use crate::traits::error::{DocSyncError, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Event delivered to a subscriber
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    /// Latest full document contents, `None` when the document does not exist
    Snapshot(Option<Value>),
    /// Failure reported by the watcher
    Error(DocSyncError),
}

/// A single field operation inside a merge write
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWrite {
    /// Overwrite the field
    Set(Value),
    /// Append values not already present in the array field
    ArrayUnion(Vec<Value>),
    /// Remove every element equal to one of the values
    ArrayRemove(Vec<Value>),
}

/// Merge write against one document
///
/// Fields not mentioned are left untouched; a missing document is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentWrite {
    fields: Vec<(String, FieldWrite)>,
}

impl DocumentWrite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.fields.push((field.into(), FieldWrite::Set(value)));
        self
    }

    pub fn array_union(mut self, field: impl Into<String>, value: Value) -> Self {
        self.fields.push((field.into(), FieldWrite::ArrayUnion(vec![value])));
        self
    }

    pub fn array_remove(mut self, field: impl Into<String>, value: Value) -> Self {
        self.fields.push((field.into(), FieldWrite::ArrayRemove(vec![value])));
        self
    }

    pub fn fields(&self) -> &[(String, FieldWrite)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Trait for document backends
///
/// Implementations own reconnection: a subscriber only ever sees snapshots
/// and the errors the backend could not recover from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &str;

    /// Subscribe to a document
    ///
    /// The first event delivered is always the current snapshot.
    ///
    /// # Returns
    /// * `Ok(Subscription)` - Live subscription
    /// * `Err(DocSyncError::NotFound)` - The store itself is unreachable
    async fn subscribe(&self, path: &str) -> Result<Subscription>;

    /// Read the current document once
    async fn get(&self, path: &str) -> Result<Option<Value>>;

    /// Apply a merge write
    async fn write(&self, path: &str, write: DocumentWrite) -> Result<()>;
}

/// Check that a path has the `collection/document` shape
pub fn validate_path(path: &str) -> Result<()> {
    let segments: Vec<&str> = path.split('/').collect();

    if segments.len() != 2 {
        return Err(DocSyncError::InvalidPath(format!(
            "expected collection/document, got '{}'",
            path
        )));
    }

    for segment in segments {
        if segment.is_empty()
            || segment == "."
            || segment == ".."
            || segment.contains('\\')
        {
            return Err(DocSyncError::InvalidPath(path.to_string()));
        }
    }

    Ok(())
}
