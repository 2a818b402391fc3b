//! Typed failure values handed to the classifier.
//!
//! Failures are converted into one of a closed set of variants where they are
//! first produced: `From` impls for Rust error types, and [`Failure::from_json`]
//! for loosely shaped payloads arriving from the webview. The classifier only
//! ever matches on these variants.

mod json;

use crate::retry::TimedOut;
use serde_json::{json, Value};
use std::io;

/// Exception names the classifier gives meaning to.
pub mod names {
    pub const ERROR: &str = "Error";
    pub const ABORT: &str = "AbortError";
    pub const TIMEOUT: &str = "TimeoutError";
    pub const VALIDATION: &str = "ValidationError";
    pub const SYNTAX: &str = "SyntaxError";
    pub const IO: &str = "IoError";
}

/// A failure as raised by an operation, before classification.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Failure {
    /// The upstream service answered with a status code.
    #[error("request failed with status {status}")]
    Response { status: u16, body: Value },
    /// The request was sent but no response arrived.
    #[error("no response received")]
    NoResponse { request: Value },
    /// A named exception with a message.
    #[error("{name}: {message}")]
    Exception {
        name: String,
        message: String,
        stack: Option<String>,
    },
    /// A bare text reason.
    #[error("{0}")]
    Text(String),
    /// Anything without a recognizable shape.
    #[error("{}", .message.as_deref().unwrap_or("unrecognized failure"))]
    Opaque {
        message: Option<String>,
        payload: Value,
    },
}

impl Failure {
    pub fn response(status: u16, body: impl Into<Value>) -> Self {
        Failure::Response {
            status,
            body: body.into(),
        }
    }

    pub fn exception(name: impl Into<String>, message: impl Into<String>) -> Self {
        Failure::Exception {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    /// Equivalent of a plain `Error` carrying only a message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::exception(names::ERROR, message)
    }

    /// Converts a loosely shaped JSON failure into a typed variant. Total.
    pub fn from_json(value: Value) -> Self {
        json::from_value(value)
    }

    /// Exception name, when the failure carries one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Failure::Exception { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Diagnostic message the message-based rules inspect. Bare text is not
    /// included: it has its own rule.
    pub fn message(&self) -> Option<&str> {
        match self {
            Failure::Exception { message, .. } => Some(message),
            Failure::Opaque { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Payload kept on the record for diagnostics.
    pub fn details(&self) -> Option<Value> {
        match self {
            Failure::Response { status, body } => Some(json!({ "status": status, "data": body })),
            Failure::NoResponse { request } => Some(request.clone()),
            Failure::Exception {
                name,
                message,
                stack,
            } => Some(json!({ "name": name, "message": message, "stack": stack })),
            Failure::Text(_) => None,
            Failure::Opaque { payload, .. } => (!payload.is_null()).then(|| payload.clone()),
        }
    }
}

impl From<&str> for Failure {
    fn from(s: &str) -> Self {
        Failure::Text(s.to_string())
    }
}

impl From<String> for Failure {
    fn from(s: String) -> Self {
        Failure::Text(s)
    }
}

impl From<TimedOut> for Failure {
    fn from(e: TimedOut) -> Self {
        Failure::exception(names::TIMEOUT, e.to_string())
    }
}

impl From<serde_json::Error> for Failure {
    fn from(e: serde_json::Error) -> Self {
        Failure::exception(names::SYNTAX, e.to_string())
    }
}

impl From<io::Error> for Failure {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::TimedOut => Failure::exception(names::TIMEOUT, e.to_string()),
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof => Failure::NoResponse {
                request: json!({ "io_kind": format!("{:?}", e.kind()), "message": e.to_string() }),
            },
            _ => Failure::exception(names::IO, e.to_string()),
        }
    }
}
