//! Retry loop: run an async operation until success or the policy says stop.

use super::policy::{RetryDecision, RetryPolicy};
use std::fmt;
use std::future::Future;

/// Runs `operation` until it succeeds or `policy` runs out of attempts.
///
/// The first attempt starts immediately. On the final failure the error from
/// that attempt is returned as-is.
pub async fn execute_with_retry<F, Fut, T, E>(policy: &RetryPolicy, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    execute_with_retry_observed(policy, operation, |_, _| {}).await
}

/// Like [`execute_with_retry`], calling `on_retry(attempt, &error)` after each
/// failed attempt that will be retried, before the backoff sleep.
///
/// The observer runs synchronously; time spent in it adds to the wait before
/// the next attempt.
pub async fn execute_with_retry_observed<F, Fut, T, E, O>(
    policy: &RetryPolicy,
    mut operation: F,
    mut on_retry: O,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
    O: FnMut(u32, &E),
{
    let mut attempt = 1u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => match policy.decide(attempt) {
                RetryDecision::NoRetry => {
                    if attempt > 1 {
                        tracing::debug!(attempts = attempt, error = %e, "giving up after retries");
                    }
                    return Err(e);
                }
                RetryDecision::RetryAfter(delay) => {
                    tracing::debug!(
                        attempt,
                        max_attempts = policy.attempts(),
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "attempt failed, retrying"
                    );
                    on_retry(attempt, &e);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::time::Duration;
    use tokio::time::Instant;

    /// Asserts the gaps between attempt start times match `expected_ms`, allowing
    /// for the timer's millisecond rounding.
    fn assert_gaps(stamps: &[Duration], expected_ms: &[u64]) {
        assert_eq!(stamps.first(), Some(&Duration::ZERO), "first attempt must not wait");
        let gaps: Vec<Duration> = stamps.windows(2).map(|w| w[1] - w[0]).collect();
        assert_eq!(gaps.len(), expected_ms.len(), "gaps {gaps:?}");
        for (gap, ms) in gaps.iter().zip(expected_ms) {
            let want = Duration::from_millis(*ms);
            assert!(
                *gap >= want && *gap <= want + Duration::from_millis(2),
                "gap {gap:?}, expected {want:?}"
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn always_failing_runs_max_attempts_and_returns_last_error() {
        let calls = Cell::new(0u32);
        let policy = RetryPolicy::new(4, Duration::from_millis(10));
        let err = execute_with_retry(&policy, || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move { Err::<(), String>(format!("failure #{n}")) }
        })
        .await
        .unwrap_err();
        assert_eq!(calls.get(), 4);
        assert_eq!(err, "failure #4");
    }

    #[tokio::test(start_paused = true)]
    async fn fails_twice_then_succeeds_with_expected_delays() {
        let calls = Cell::new(0u32);
        let stamps = RefCell::new(Vec::new());
        let observed = RefCell::new(Vec::new());
        let policy = RetryPolicy::new(3, Duration::from_millis(1000)).with_backoff_factor(2.0);
        let start = Instant::now();

        let value = execute_with_retry_observed(
            &policy,
            || {
                calls.set(calls.get() + 1);
                stamps.borrow_mut().push(start.elapsed());
                let n = calls.get();
                async move {
                    if n < 3 {
                        Err(format!("attempt {n} failed"))
                    } else {
                        Ok("done")
                    }
                }
            },
            |attempt, e: &String| observed.borrow_mut().push((attempt, e.clone())),
        )
        .await
        .unwrap();

        assert_eq!(value, "done");
        assert_eq!(calls.get(), 3);
        assert_gaps(&stamps.borrow(), &[1000, 2000]);
        assert_eq!(
            *observed.borrow(),
            vec![(1, "attempt 1 failed".to_string()), (2, "attempt 2 failed".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn no_delay_after_success() {
        let policy = RetryPolicy::new(5, Duration::from_secs(10));
        let start = Instant::now();
        let v = execute_with_retry(&policy, || async { Ok::<_, String>(7) })
            .await
            .unwrap();
        assert_eq!(v, 7);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn single_attempt_is_pass_through() {
        let calls = Cell::new(0u32);
        let retried = Cell::new(false);
        let policy = RetryPolicy::new(1, Duration::ZERO);
        let start = Instant::now();
        let err = execute_with_retry_observed(
            &policy,
            || {
                calls.set(calls.get() + 1);
                async { Err::<(), _>("boom") }
            },
            |_, _| retried.set(true),
        )
        .await
        .unwrap_err();
        assert_eq!(err, "boom");
        assert_eq!(calls.get(), 1);
        assert!(!retried.get());
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn zero_base_delay_still_runs_each_attempt() {
        let calls = Cell::new(0u32);
        let policy = RetryPolicy::new(3, Duration::ZERO);
        let err = execute_with_retry(&policy, || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move { Err::<(), u32>(n) }
        })
        .await
        .unwrap_err();
        assert_eq!(calls.get(), 3);
        assert_eq!(err, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn delays_are_capped() {
        let stamps = RefCell::new(Vec::new());
        let policy = RetryPolicy::new(4, Duration::from_millis(100))
            .with_backoff_factor(10.0)
            .with_max_delay(Duration::from_millis(500));
        let start = Instant::now();
        let _ = execute_with_retry(&policy, || {
            stamps.borrow_mut().push(start.elapsed());
            async { Err::<(), _>("nope") }
        })
        .await;
        assert_gaps(&stamps.borrow(), &[100, 500, 500]);
    }
}
