//! Filesystem-backed document store
//!
//! Layout: `<root>/<collection>/<document>.json`. Each subscription runs a
//! watcher task that re-reads its file every poll interval and publishes a
//! snapshot whenever the parsed contents change. A missing file is an absent
//! document; a missing root is a not-found error.

use crate::core::merge::apply_write;
use crate::core::subscription::Subscription;
use crate::traits::{
    validate_path, Backoff, DocSyncError, DocumentEvent, DocumentSource, DocumentWrite,
    ReconnectPolicy, Result,
};
use async_trait::async_trait;
use crossbeam_channel::{unbounded, Sender};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Configuration for [`FileDocumentSource`]
#[derive(Clone)]
pub struct FileSourceConfig {
    /// Directory holding one sub-directory per collection
    pub root: PathBuf,
    /// How often watchers re-read their document
    pub poll_interval: Duration,
    /// Retry policy for failed reads
    pub reconnect: Arc<dyn ReconnectPolicy>,
}

impl FileSourceConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            poll_interval: Duration::from_millis(500),
            reconnect: Arc::new(Backoff::default()),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_reconnect(mut self, policy: Arc<dyn ReconnectPolicy>) -> Self {
        self.reconnect = policy;
        self
    }
}

/// Document source reading and writing JSON files
pub struct FileDocumentSource {
    config: FileSourceConfig,
    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl FileDocumentSource {
    pub fn new(config: FileSourceConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    fn file_path(&self, path: &str) -> Result<PathBuf> {
        validate_path(path)?;
        Ok(self.config.root.join(format!("{}.json", path)))
    }

    fn ensure_root(&self) -> Result<()> {
        if self.config.root.is_dir() {
            Ok(())
        } else {
            Err(DocSyncError::NotFound(format!(
                "document root {} does not exist",
                self.config.root.display()
            )))
        }
    }
}

/// Read and parse one document file, `None` when the file does not exist
async fn read_document(file: &Path) -> Result<Option<Value>> {
    match tokio::fs::read_to_string(file).await {
        Ok(content) => {
            if content.trim().is_empty() {
                return Ok(None);
            }
            Ok(Some(serde_json::from_str(&content)?))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write through a temp file so watchers never observe a torn document
async fn write_document(file: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = file.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = file.with_extension("json.tmp");
    let body = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(&tmp, body).await?;
    tokio::fs::rename(&tmp, file).await?;
    Ok(())
}

struct Watcher {
    path: String,
    file: PathBuf,
    root: PathBuf,
    poll_interval: Duration,
    reconnect: Arc<dyn ReconnectPolicy>,
    active: Arc<AtomicBool>,
    events: Sender<DocumentEvent>,
}

impl Watcher {
    async fn run(self) {
        let mut last: Option<Option<Value>> = None;
        let mut attempt = 0usize;

        while self.active.load(Ordering::Acquire) {
            if !self.root.is_dir() {
                warn!("[DocSync] Root {} vanished, closing {}", self.root.display(), self.path);
                let _ = self.events.send(DocumentEvent::Error(DocSyncError::NotFound(format!(
                    "document root {} does not exist",
                    self.root.display()
                ))));
                return;
            }

            match read_document(&self.file).await {
                Ok(document) => {
                    if attempt > 0 {
                        info!("[DocSync] {} readable again after {} attempts", self.path, attempt);
                    }
                    attempt = 0;

                    if last.as_ref() != Some(&document) {
                        debug!("[DocSync] {} changed", self.path);
                        if self.events.send(DocumentEvent::Snapshot(document.clone())).is_err() {
                            return;
                        }
                        last = Some(document);
                    }

                    tokio::time::sleep(self.poll_interval).await;
                }
                Err(e) => {
                    let Some(delay) = self.reconnect.delay_for(attempt) else {
                        let _ = self.events.send(DocumentEvent::Error(
                            DocSyncError::ReconnectionFailed {
                                attempts: attempt,
                                reason: e.to_string(),
                            },
                        ));
                        return;
                    };

                    // Report the first failure of a streak only
                    if attempt == 0 {
                        warn!("[DocSync] Failed to read {}: {}", self.path, e);
                        let event = DocumentEvent::Error(DocSyncError::Unavailable(e.to_string()));
                        if self.events.send(event).is_err() {
                            return;
                        }
                    }

                    attempt += 1;
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl DocumentSource for FileDocumentSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn subscribe(&self, path: &str) -> Result<Subscription> {
        let file = self.file_path(path)?;
        self.ensure_root()?;

        let (tx, rx) = unbounded();
        let active = Arc::new(AtomicBool::new(true));

        let watcher = Watcher {
            path: path.to_string(),
            file,
            root: self.config.root.clone(),
            poll_interval: self.config.poll_interval,
            reconnect: Arc::clone(&self.config.reconnect),
            active: Arc::clone(&active),
            events: tx,
        };

        info!("[DocSync] Watching {} under {}", path, self.config.root.display());
        let task = tokio::spawn(watcher.run());

        Ok(Subscription::new(path, rx, active, Some(task)))
    }

    async fn get(&self, path: &str) -> Result<Option<Value>> {
        let file = self.file_path(path)?;
        self.ensure_root()?;
        read_document(&file).await
    }

    async fn write(&self, path: &str, write: DocumentWrite) -> Result<()> {
        let file = self.file_path(path)?;
        self.ensure_root()?;

        let _guard = self.write_lock.lock().await;
        let existing = read_document(&file).await?;
        let updated = apply_write(existing, &write)?;
        write_document(&file, &updated).await?;

        debug!("[DocSync] Wrote {} ({} fields)", path, write.fields().len());
        Ok(())
    }
}
