use std::time::Duration;

/// Ceiling applied when a policy does not set `max_delay`.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry; propagate the failure.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Exponential backoff policy for one invocation of the executor.
///
/// The delay after failed attempt `k` (1-based) is
/// `min(max_delay, base_delay * backoff_factor^(k-1))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first). Zero is treated as one.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound on backoff delay; `None` means [`DEFAULT_MAX_DELAY`].
    pub max_delay: Option<Duration>,
    /// Per-retry multiplier. Values below 1 (or not finite) behave as 1.
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: None,
            backoff_factor: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries.
    pub const NONE: Self = Self {
        max_attempts: 1,
        base_delay: Duration::ZERO,
        max_delay: None,
        backoff_factor: 1.0,
    };

    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            ..Self::default()
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    pub fn with_backoff_factor(mut self, factor: f64) -> Self {
        self.backoff_factor = factor;
        self
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    fn factor(&self) -> f64 {
        if self.backoff_factor.is_finite() && self.backoff_factor >= 1.0 {
            self.backoff_factor
        } else {
            1.0
        }
    }

    /// Delay to wait after failed attempt `attempt` (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let cap = self.max_delay.unwrap_or(DEFAULT_MAX_DELAY);
        let exp = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let nanos = self.base_delay.as_nanos() as f64 * self.factor().powi(exp);
        if !nanos.is_finite() || nanos >= cap.as_nanos() as f64 {
            return cap;
        }
        Duration::from_nanos(nanos.round() as u64).min(cap)
    }

    /// Whether to retry after failed attempt `attempt` (1-based), and how long
    /// to wait first.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.attempts() {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.delay_for_attempt(attempt))
    }
}
