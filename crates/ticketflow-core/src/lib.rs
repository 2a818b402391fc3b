pub mod config;
pub mod logging;

pub mod classify;
pub mod failure;
pub mod handler;
pub mod record;
pub mod retry;
pub mod taxonomy;
pub mod ticket;
pub mod workflow;

pub use classify::{classify, is_recoverable};
pub use failure::Failure;
pub use handler::ErrorHandler;
pub use record::ErrorRecord;
pub use retry::{execute_with_retry, execute_with_retry_observed, with_timeout, RetryPolicy};
pub use taxonomy::{ErrorCode, Severity};
