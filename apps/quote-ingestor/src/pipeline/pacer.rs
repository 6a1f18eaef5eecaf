//! Pacing policy between consecutive provider fetches.

use std::time::Duration;

use async_trait::async_trait;

/// Port for enforcing a minimum spacing between outbound provider calls.
///
/// The orchestrator awaits the pacer between symbols, never before the
/// first fetch or after the last.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Pause until the next fetch is allowed to start.
    async fn pause(&self);
}

/// Fixed-interval pacer backed by the tokio timer.
///
/// The default interval derives from the provider's free tier of five
/// calls per 60 seconds.
#[derive(Debug, Clone)]
pub struct IntervalPacer {
    interval: Duration,
}

impl IntervalPacer {
    /// Default minimum spacing between fetches.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(12);

    /// Create a pacer with the given minimum interval.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for IntervalPacer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

#[async_trait]
impl Pacer for IntervalPacer {
    async fn pause(&self) {
        tracing::debug!(
            interval_secs = self.interval.as_secs(),
            "Waiting before next provider call"
        );
        tokio::time::sleep(self.interval).await;
    }
}

/// Pacer that never waits. Makes orchestrator tests deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pause(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn interval_pacer_waits_full_interval() {
        let pacer = IntervalPacer::new(Duration::from_secs(12));
        let start = tokio::time::Instant::now();

        pacer.pause().await;

        assert!(start.elapsed() >= Duration::from_secs(12));
    }

    #[tokio::test]
    async fn noop_pacer_returns_immediately() {
        let start = std::time::Instant::now();
        NoopPacer.pause().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn default_interval_matches_provider_limit() {
        assert_eq!(IntervalPacer::DEFAULT_INTERVAL, Duration::from_secs(12));
    }
}
