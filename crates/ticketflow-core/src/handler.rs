//! Error handler: classify, log and report failures for a caller.
//!
//! Built once from [`HandlerConfig`] and passed by reference to whatever needs
//! it; there is no process-wide instance.

use crate::classify::classify;
use crate::config::HandlerConfig;
use crate::failure::Failure;
use crate::record::ErrorRecord;
use crate::retry::{execute_with_retry, RetryPolicy};
use crate::taxonomy::{ErrorCode, Severity};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Callback notified with every record the handler produces.
pub type ErrorObserver = Arc<dyn Fn(&ErrorRecord) + Send + Sync>;

#[derive(Clone)]
pub struct ErrorHandler {
    log_errors: bool,
    enable_retry: bool,
    on_error: Option<ErrorObserver>,
}

impl fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorHandler")
            .field("log_errors", &self.log_errors)
            .field("enable_retry", &self.enable_retry)
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

impl Default for ErrorHandler {
    fn default() -> Self {
        Self::new(&HandlerConfig::default())
    }
}

impl ErrorHandler {
    pub fn new(cfg: &HandlerConfig) -> Self {
        Self {
            log_errors: cfg.log_errors,
            enable_retry: cfg.enable_retry,
            on_error: None,
        }
    }

    pub fn with_observer(mut self, observer: impl Fn(&ErrorRecord) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(observer));
        self
    }

    pub fn retry_enabled(&self) -> bool {
        self.enable_retry
    }

    /// Build a record directly, bypassing classification.
    pub fn create(
        code: ErrorCode,
        message: impl Into<String>,
        details: Option<Value>,
        retryable: bool,
    ) -> ErrorRecord {
        ErrorRecord::new(code, message, Severity::default(), retryable).with_details(details)
    }

    /// Classify `failure`, log it and notify the observer.
    pub fn handle(&self, failure: &Failure, context: &str) -> ErrorRecord {
        let record = classify(failure, Some(context));
        self.report(&record);
        record
    }

    /// Run `operation` under `policy` (or once, when retries are disabled) and
    /// turn a terminal failure into a handled record.
    pub async fn handle_async<F, Fut, T, E>(
        &self,
        context: &str,
        policy: &RetryPolicy,
        operation: F,
    ) -> Result<T, ErrorRecord>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<Failure> + fmt::Display,
    {
        let policy = if self.enable_retry {
            *policy
        } else {
            RetryPolicy::NONE
        };
        execute_with_retry(&policy, operation)
            .await
            .map_err(|e| self.handle(&e.into(), context))
    }

    /// Phrase to show an end user for `record`.
    pub fn user_message<'a>(&self, record: &'a ErrorRecord) -> &'a str {
        &record.user_message
    }

    pub fn is_recoverable(&self, record: &ErrorRecord) -> bool {
        record.is_recoverable()
    }

    pub fn is_retryable(&self, record: &ErrorRecord) -> bool {
        record.retryable
    }

    fn report(&self, record: &ErrorRecord) {
        if self.log_errors {
            let context = record.context.as_deref().unwrap_or("-");
            let details = record
                .details
                .as_ref()
                .map(Value::to_string)
                .unwrap_or_default();
            match record.severity {
                Severity::High | Severity::Critical => tracing::error!(
                    code = %record.code,
                    severity = %record.severity,
                    retryable = record.retryable,
                    context,
                    details = %details,
                    "{}",
                    record.message
                ),
                Severity::Medium | Severity::Low => tracing::warn!(
                    code = %record.code,
                    severity = %record.severity,
                    retryable = record.retryable,
                    context,
                    details = %details,
                    "{}",
                    record.message
                ),
            }
        }
        if let Some(observer) = &self.on_error {
            observer(record);
        }
    }
}
