//! Race an operation against a deadline.

use std::future::Future;
use std::time::Duration;

/// Limit used when callers do not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Returned by [`with_timeout`] when the deadline passes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Operation timed out after {}ms", .limit.as_millis())]
pub struct TimedOut {
    pub limit: Duration,
}

/// Runs `operation` until it completes or `limit` elapses, whichever is first.
///
/// On timeout the operation's future is dropped and no longer polled. Work it
/// already handed off elsewhere (spawned tasks, requests in flight) may still
/// complete; callers must not assume its side effects were undone.
pub async fn with_timeout<Fut, T, E>(limit: Duration, operation: Fut) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    E: From<TimedOut>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!(limit_ms = limit.as_millis() as u64, "operation timed out");
            Err(TimedOut { limit }.into())
        }
    }
}
