//! Bounded retry with exponential backoff for a single model call.
//!
//! The policy is stateless and applied uniformly to every call. Only
//! transient failures are retried: timeouts, connection failures, and
//! responses carrying one of the retryable status codes. Anything else
//! is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, timeout};

use super::error::AnswerError;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_BACKOFF_MULTIPLIER: u32 = 2;
pub const DEFAULT_RETRYABLE_STATUSES: [u16; 3] = [502, 503, 504];
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    pub backoff_multiplier: u32,
    pub retryable_statuses: Vec<u16>,
    /// Limit on a single attempt
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            retryable_statuses: DEFAULT_RETRYABLE_STATUSES.to_vec(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, timeout: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            timeout,
            ..Self::default()
        }
    }

    /// Delay to wait before retry number `retry` (starting at 1)
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self
            .backoff_multiplier
            .saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    pub fn is_retryable(&self, err: &AnswerError) -> bool {
        match err {
            AnswerError::TransientModel { .. } => true,
            AnswerError::Model {
                status: Some(status),
                ..
            } => self.retryable_statuses.contains(status),
            _ => false,
        }
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or
    /// the attempt budget runs out. `op` receives the attempt number
    /// starting at 1.
    pub async fn run<T, F, Fut>(&self, model: &str, mut op: F) -> Result<T, AnswerError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, AnswerError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            let result = match timeout(self.timeout, op(attempt)).await {
                Ok(result) => result,
                Err(_) => Err(AnswerError::TransientModel {
                    model: model.to_string(),
                    reason: format!("timed out after {}s", self.timeout.as_secs_f64()),
                }),
            };

            let err = match result {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !self.is_retryable(&err) {
                return Err(err);
            }

            if attempt >= max_attempts {
                tracing::warn!(
                    "Model {} still failing after {} attempts: {}",
                    model,
                    attempt,
                    err
                );
                return Err(into_transient(model, attempt, err));
            }

            let delay = self.delay_for(attempt);
            tracing::warn!(
                "Attempt {}/{} for model {} failed: {}. Retrying in {:?}",
                attempt,
                max_attempts,
                model,
                err,
                delay
            );
            sleep(delay).await;
            attempt += 1;
        }
    }
}

// A retryable status that outlived the budget is reported the same way
// as a timeout: the model is busy.
fn into_transient(model: &str, attempts: u32, err: AnswerError) -> AnswerError {
    match err {
        AnswerError::Model {
            status: Some(status),
            ..
        } => AnswerError::TransientModel {
            model: model.to_string(),
            reason: format!("status {} after {} attempts", status, attempts),
        },
        other => other,
    }
}
