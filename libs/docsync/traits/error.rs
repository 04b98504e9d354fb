use thiserror::Error;

/// Main error type for docsync
///
/// Cloneable so that one failure can be fanned out to every subscriber of
/// a document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocSyncError {
    /// The document store (or the collection root) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Filesystem or transport failure
    #[error("IO error: {0}")]
    Io(String),

    /// Document payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Backend temporarily unreachable, the watcher keeps retrying
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// Malformed `collection/document` path
    #[error("Invalid document path: {0}")]
    InvalidPath(String),

    /// Write could not be applied to the stored document
    #[error("Write rejected: {0}")]
    WriteRejected(String),

    /// Watcher gave up after exhausting its reconnect policy
    #[error("Reconnection failed after {attempts} attempts: {reason}")]
    ReconnectionFailed { attempts: usize, reason: String },
}

impl DocSyncError {
    /// Not-found class errors are unrecoverable for a subscriber
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocSyncError::NotFound(_))
    }

    /// Errors the watcher recovers from on its own
    pub fn is_transient(&self) -> bool {
        matches!(self, DocSyncError::Unavailable(_) | DocSyncError::Io(_))
    }
}

impl From<std::io::Error> for DocSyncError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => DocSyncError::NotFound(err.to_string()),
            _ => DocSyncError::Io(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for DocSyncError {
    fn from(err: serde_json::Error) -> Self {
        DocSyncError::Serialization(err.to_string())
    }
}

/// Result type for docsync operations
pub type Result<T> = std::result::Result<T, DocSyncError>;
