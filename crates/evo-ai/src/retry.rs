//! Caller-driven retry for rate-limited sends.
//!
//! Retry is a policy of the caller, not of the session: `Session::send`
//! issues exactly one remote call. This wrapper re-sends only on
//! `ChatError::RateLimited`, waiting `base_delay * (attempt + 1)` between
//! attempts (linear backoff). Every other error returns immediately, with
//! the session already rolled back by `send`.

use std::time::Duration;

use tracing::warn;

use crate::{ChatClient, ChatError, Session};

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Base wait; attempt `n` (0-based) waits `base_delay * (n + 1)`.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Wait before the retry that follows 0-based `attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt + 1)
    }
}

/// `Session::send` with linear backoff on rate limits.
pub async fn send_with_retry(
    session: &mut Session,
    client: &dyn ChatClient,
    user_text: &str,
    policy: &RetryPolicy,
) -> Result<String, ChatError> {
    let mut attempt = 0;
    loop {
        match session.send(client, user_text).await {
            Err(ChatError::RateLimited) if attempt + 1 < policy.max_attempts => {
                let wait = policy.delay_after(attempt);
                warn!(attempt, wait_secs = wait.as_secs(), "rate limited, backing off");
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}
