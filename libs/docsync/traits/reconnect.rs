use std::time::Duration;

/// Decides how a document watcher retries after a failed read
///
/// Attempts are counted per failure streak and start at 0; a successful
/// read starts a new streak.
pub trait ReconnectPolicy: Send + Sync {
    /// Delay before retry number `attempt`, or `None` to give up
    fn delay_for(&self, attempt: usize) -> Option<Duration>;
}

/// Exponential backoff: `initial * 2^attempt`, capped at `max`
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    max_attempts: Option<usize>,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration, max_attempts: Option<usize>) -> Self {
        Self {
            initial,
            max,
            max_attempts,
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_secs(10), None)
    }
}

impl ReconnectPolicy for Backoff {
    fn delay_for(&self, attempt: usize) -> Option<Duration> {
        if self.max_attempts.is_some_and(|max| attempt >= max) {
            return None;
        }

        let factor = 1u32.checked_shl(attempt.min(31) as u32).unwrap_or(u32::MAX);
        Some(self.initial.saturating_mul(factor).min(self.max))
    }
}

/// Same delay for every retry
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
    max_attempts: Option<usize>,
}

impl FixedDelay {
    pub fn new(delay: Duration, max_attempts: Option<usize>) -> Self {
        Self { delay, max_attempts }
    }
}

impl ReconnectPolicy for FixedDelay {
    fn delay_for(&self, attempt: usize) -> Option<Duration> {
        match self.max_attempts {
            Some(max) if attempt >= max => None,
            _ => Some(self.delay),
        }
    }
}

/// Give up on the first failure
#[derive(Debug, Clone, Default)]
pub struct NoReconnect;

impl ReconnectPolicy for NoReconnect {
    fn delay_for(&self, _attempt: usize) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_until_cap() {
        let policy = Backoff::new(Duration::from_millis(100), Duration::from_millis(500), None);

        assert_eq!(policy.delay_for(0), Some(Duration::from_millis(100)));
        assert_eq!(policy.delay_for(1), Some(Duration::from_millis(200)));
        assert_eq!(policy.delay_for(2), Some(Duration::from_millis(400)));
        assert_eq!(policy.delay_for(3), Some(Duration::from_millis(500)));
        assert_eq!(policy.delay_for(60), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_backoff_respects_attempt_limit() {
        let policy = Backoff::new(Duration::from_millis(10), Duration::from_secs(1), Some(2));

        assert!(policy.delay_for(1).is_some());
        assert_eq!(policy.delay_for(2), None);
    }

    #[test]
    fn test_fixed_delay_and_no_reconnect() {
        let fixed = FixedDelay::new(Duration::from_millis(250), Some(3));
        assert_eq!(fixed.delay_for(2), Some(Duration::from_millis(250)));
        assert_eq!(fixed.delay_for(3), None);

        assert_eq!(NoReconnect.delay_for(0), None);
    }
}
