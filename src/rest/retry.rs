// src/rest/retry.rs

use std::time::Duration;

use reqwest::StatusCode;

/// Retry policy applied by [`RestService`](super::RestService) to connection
/// failures and to the configured set of retryable statuses.
///
/// The defaults mirror the gateway's observed flakiness: up to 3 retries with
/// exponential backoff starting at 300ms (doubling per attempt) on
/// 400/500/502/504. Retries cover transport-level failure categories only;
/// business errors are never retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_factor: Duration,
    pub retry_statuses: Vec<StatusCode>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: Duration::from_millis(300),
            retry_statuses: vec![
                StatusCode::BAD_REQUEST,
                StatusCode::INTERNAL_SERVER_ERROR,
                StatusCode::BAD_GATEWAY,
                StatusCode::GATEWAY_TIMEOUT,
            ],
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries. Handy in tests and for callers that want
    /// fail-fast semantics.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff_factor: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn is_retryable(&self, status: StatusCode) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Backoff before retry number `attempt` (0-based): `factor * 2^attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_factor * 2u32.saturating_pow(attempt)
    }
}
