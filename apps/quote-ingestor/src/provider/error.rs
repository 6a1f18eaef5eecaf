//! Quote provider error types.

use thiserror::Error;

/// Failures from a single quote fetch, in classification order.
///
/// Every variant is a per-symbol soft failure: the orchestrator records the
/// symbol as failed and proceeds to the next one. The fetch itself never
/// retries; retry policy belongs to the external scheduler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network failure, timeout, or non-2xx status.
    #[error("transport error: {0}")]
    Transport(String),

    /// 2xx body that does not decode into the expected response shape.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// Payload carried an explicit `Error Message` field.
    #[error("provider error: {0}")]
    Provider(String),

    /// Payload carried a rate-limit `Note`. Logged distinctly from
    /// provider errors; never fatal to the batch.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Expected time-series key absent, or present but empty.
    #[error("no time series data in response")]
    EmptySeries,
}

impl FetchError {
    /// Whether this failure is the provider's rate-limit signal.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }
}
