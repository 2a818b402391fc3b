//! Retry and backoff.
//!
//! The executor is a pure control-flow combinator: it re-runs an async
//! operation with exponential backoff and hands back the last failure
//! untouched. Classifying that failure is the caller's job (see
//! [`crate::classify`]).

mod policy;
mod run;
mod timeout;

pub use policy::{RetryDecision, RetryPolicy, DEFAULT_MAX_DELAY};
pub use run::{execute_with_retry, execute_with_retry_observed};
pub use timeout::{with_timeout, TimedOut, DEFAULT_TIMEOUT};
