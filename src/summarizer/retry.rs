use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

use crate::summarizer::errors::SummarizeError;

/// Bounded retry with linear backoff, applied only to transient overload.
///
/// Attempt `n` (1-based) waits `base * (n - 1)` before it starts, so with
/// three attempts the waits are `base` then `2 * base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay_before(&self, attempt: u32) -> Duration {
        self.base.saturating_mul(attempt.saturating_sub(1))
    }

    /// Run `op` until it succeeds, fails with a non-transient error, or the
    /// attempt budget runs out. `op` receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, SummarizeError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, SummarizeError>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    attempt += 1;
                    let delay = self.delay_before(attempt);
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "summarizer overloaded, retrying"
                    );
                    sleep(delay).await;
                }
                Err(err) if err.is_transient() => {
                    return Err(SummarizeError::Exhausted { attempts: attempt });
                }
                Err(err) => return Err(err),
            }
        }
    }
}
