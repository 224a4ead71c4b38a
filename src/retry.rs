//! Shared retry/timeout policy applied around every outgoing backend call.
//!
//! One policy instance is owned by each client adapter, parameterized by the
//! adapter's retry budget and per-attempt timeout. The loop is local and
//! explicit rather than hidden in a transport interceptor, so the behavior
//! does not depend on any RPC framework extension mechanism.

use std::future::Future;
use std::time::Duration;

use tonic::{Code, Status};

/// Status codes eligible for automatic re-attempt. Anything else is
/// surfaced immediately.
const RETRYABLE_CODES: [Code; 3] = [Code::NotFound, Code::Aborted, Code::DeadlineExceeded];

/// Retry policy configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Additional attempts beyond the first; 0 means no retry
    pub max_retries: u32,
    /// Deadline applied to each individual attempt
    pub per_attempt_timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            per_attempt_timeout: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    /// Create a retry config with a custom retry budget.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Create a retry config with a custom per-attempt timeout.
    #[must_use]
    pub const fn with_per_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.per_attempt_timeout = timeout;
        self
    }
}

/// Retry policy for executing backend calls with bounded re-attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy with the given configuration.
    #[must_use]
    pub const fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Whether a status code is eligible for re-attempt.
    #[must_use]
    pub fn is_retryable(code: Code) -> bool {
        RETRYABLE_CODES.contains(&code)
    }

    /// Total attempts this policy may issue.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        1 + self.config.max_retries
    }

    /// Execute an operation, re-issuing it on retryable failures until the
    /// attempt budget is exhausted.
    ///
    /// Each attempt is bounded by the per-attempt timeout; an elapsed attempt
    /// counts as `DeadlineExceeded` and consumes one retry if budget remains.
    /// Attempts are strictly sequential and re-issued immediately, with no
    /// back-off. The last observed status is surfaced on exhaustion.
    ///
    /// # Errors
    ///
    /// Returns the terminal status once the budget is exhausted or a
    /// non-retryable status is observed.
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T, Status>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Status>>,
    {
        let mut attempt: u32 = 0;
        loop {
            let result = match tokio::time::timeout(self.config.per_attempt_timeout, operation())
                .await
            {
                Ok(result) => result,
                Err(_) => Err(Status::deadline_exceeded(format!(
                    "attempt timed out after {:?}",
                    self.config.per_attempt_timeout
                ))),
            };

            match result {
                Ok(value) => return Ok(value),
                Err(status) => {
                    if !Self::is_retryable(status.code()) || attempt >= self.config.max_retries {
                        return Err(status);
                    }
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}
