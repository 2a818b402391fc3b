//! Normalized error record produced by classification.

use crate::classify::messages;
use crate::taxonomy::{ErrorCode, Severity};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::SystemTime;

/// Normalized description of a failure, used for logging and for deciding
/// whether to offer the user a retry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub code: ErrorCode,
    /// Diagnostic message. Not shown to end users; see `user_message`.
    pub message: String,
    pub severity: Severity,
    /// Where the failure happened, as labelled by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Original failure payload, for developer-facing logs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Safe to retry automatically.
    pub retryable: bool,
    pub timestamp: SystemTime,
    /// End-user phrase derived from `code`.
    pub user_message: String,
}

impl ErrorRecord {
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        severity: Severity,
        retryable: bool,
    ) -> Self {
        let message = message.into();
        let user_message = messages::user_message_for(code)
            .map(str::to_string)
            .unwrap_or_else(|| message.clone());
        Self {
            code,
            message,
            severity,
            context: None,
            details: None,
            retryable,
            timestamp: SystemTime::now(),
            user_message,
        }
    }

    pub fn with_context(mut self, context: Option<&str>) -> Self {
        self.context = context.map(str::to_string);
        self
    }

    pub fn with_details(mut self, details: Option<Value>) -> Self {
        self.details = details;
        self
    }

    /// Worth offering a user-initiated retry. Independent of `retryable`.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::NetworkError
                | ErrorCode::TimeoutError
                | ErrorCode::ApiError
                | ErrorCode::RateLimitError
        ) && self.severity != Severity::Critical
    }
}
