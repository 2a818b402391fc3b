//! Ordered classification rules. The first rule whose predicate matches
//! decides the outcome; the last rule matches everything.

use super::fallback::{self, mentions_any, mentions_network, mentions_timeout};
use crate::failure::{names, Failure};
use crate::taxonomy::{ErrorCode, Severity};

/// Outcome of a matched rule, before context and details are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub code: ErrorCode,
    pub severity: Severity,
    pub retryable: bool,
    pub message: String,
}

impl Verdict {
    fn new(code: ErrorCode, severity: Severity, retryable: bool, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            retryable,
            message: message.into(),
        }
    }
}

/// A named predicate/verdict pair.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&Failure) -> bool,
    pub verdict: fn(&Failure) -> Verdict,
}

pub const GENERIC_MESSAGE: &str = "An unexpected error occurred";

const TIMEOUT_NAMES: [&str; 2] = [names::ABORT, names::TIMEOUT];
const PARSE_NAMES: [&str; 2] = [names::SYNTAX, "ParseError"];

pub static RULES: [Rule; 8] = [
    Rule {
        name: "response-status",
        applies: |f| matches!(f, Failure::Response { .. }),
        verdict: response_verdict,
    },
    Rule {
        name: "no-response",
        applies: |f| matches!(f, Failure::NoResponse { .. }),
        verdict: |_| {
            Verdict::new(
                ErrorCode::NetworkError,
                Severity::High,
                true,
                "Network error. Please check your internet connection.",
            )
        },
    },
    Rule {
        name: "timeout",
        applies: |f| {
            f.name().is_some_and(|n| TIMEOUT_NAMES.contains(&n))
                || f.message().is_some_and(|m| mentions_timeout(&m.to_lowercase()))
        },
        verdict: |f| {
            Verdict::new(
                ErrorCode::TimeoutError,
                Severity::Medium,
                true,
                message_or(f, "Request timed out. Please try again."),
            )
        },
    },
    Rule {
        name: "validation",
        applies: |f| {
            f.name() == Some(names::VALIDATION) || message_mentions(f, &["invalid", "validation"])
        },
        verdict: |f| {
            Verdict::new(
                ErrorCode::ValidationError,
                Severity::Medium,
                false,
                message_or(f, "Validation failed."),
            )
        },
    },
    Rule {
        name: "parse",
        applies: |f| f.name().is_some_and(|n| PARSE_NAMES.contains(&n)),
        verdict: |_| {
            Verdict::new(
                ErrorCode::ApiError,
                Severity::Medium,
                false,
                "The server response could not be processed.",
            )
        },
    },
    Rule {
        name: "network-message",
        applies: |f| f.message().is_some_and(|m| mentions_network(&m.to_lowercase())),
        verdict: |f| {
            Verdict::new(
                ErrorCode::NetworkError,
                Severity::High,
                true,
                message_or(f, "Network request failed."),
            )
        },
    },
    Rule {
        name: "bare-text",
        applies: |f| matches!(f, Failure::Text(_)),
        verdict: |f| {
            let text = match f {
                Failure::Text(s) => s.clone(),
                other => other.to_string(),
            };
            Verdict::new(ErrorCode::UnknownError, Severity::Medium, false, text)
        },
    },
    Rule {
        name: "fallback",
        applies: |_| true,
        verdict: fallback_verdict,
    },
];

fn response_verdict(f: &Failure) -> Verdict {
    let Failure::Response { status, .. } = f else {
        return fallback_verdict(f);
    };
    let status = *status;
    match status {
        401 => Verdict::new(
            ErrorCode::AuthenticationError,
            Severity::High,
            false,
            "Authentication failed. Please log in again.",
        ),
        403 => Verdict::new(
            ErrorCode::PermissionDenied,
            Severity::High,
            false,
            "You don't have permission to access this resource.",
        ),
        404 => Verdict::new(
            ErrorCode::ApiError,
            Severity::Medium,
            false,
            "Jira ticket not found. Please check the URL.",
        ),
        429 => Verdict::new(
            ErrorCode::RateLimitError,
            Severity::Medium,
            true,
            "Too many requests. Please wait before trying again.",
        ),
        500 | 502 | 503 => Verdict::new(
            ErrorCode::ApiError,
            Severity::High,
            true,
            "Jira server error. Please try again later.",
        ),
        s if s >= 500 => Verdict::new(
            ErrorCode::ApiError,
            Severity::High,
            true,
            format!("Request failed with status {s}"),
        ),
        s => Verdict::new(
            ErrorCode::ApiError,
            Severity::Medium,
            false,
            format!("Request failed with status {s}"),
        ),
    }
}

fn fallback_verdict(f: &Failure) -> Verdict {
    let message = message_or(f, GENERIC_MESSAGE);
    let severity = match f.name() {
        Some(name) => fallback::severity_for(name, f.message().unwrap_or_default()),
        None => Severity::Medium,
    };
    Verdict::new(ErrorCode::UnknownError, severity, false, message)
}

fn message_mentions(f: &Failure, needles: &[&str]) -> bool {
    f.message()
        .is_some_and(|m| mentions_any(&m.to_lowercase(), needles))
}

fn message_or(f: &Failure, default: &str) -> String {
    match f.message() {
        Some(m) if !m.trim().is_empty() => m.to_string(),
        _ => default.to_string(),
    }
}
