//! Graceful shutdown management

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;
use tracing::info;

#[derive(Default)]
struct ShutdownState {
    stopped: AtomicBool,
    notify: Notify,
}

/// Shutdown flag shared between the signal handler and long-running loops
#[derive(Clone, Default)]
pub struct ShutdownManager {
    state: Arc<ShutdownState>,
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a Ctrl+C signal handler that triggers shutdown
    pub fn spawn_signal_handler(&self) {
        let manager = self.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                info!("[Shutdown] Received Ctrl+C, shutting down gracefully...");
                manager.trigger();
            }
        });
    }

    pub fn trigger(&self) {
        self.state.stopped.store(true, Ordering::Release);
        self.state.notify.notify_waiters();
    }

    pub fn is_running(&self) -> bool {
        !self.state.stopped.load(Ordering::Acquire)
    }

    /// Sleep for a duration, but wake early if shutdown is triggered
    pub async fn interruptible_sleep(&self, duration: Duration) {
        let notified = self.state.notify.notified();
        if !self.is_running() {
            return;
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => {}
            _ = notified => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_trigger_wakes_sleepers() {
        let shutdown = ShutdownManager::new();
        assert!(shutdown.is_running());

        let waker = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            waker.trigger();
        });

        let started = Instant::now();
        shutdown.interruptible_sleep(Duration::from_secs(10)).await;
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!shutdown.is_running());
    }

    #[tokio::test]
    async fn test_sleep_returns_immediately_after_shutdown() {
        let shutdown = ShutdownManager::new();
        shutdown.trigger();
        let started = Instant::now();
        shutdown.interruptible_sleep(Duration::from_secs(10)).await;
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
