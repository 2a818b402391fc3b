//! JSON boundary: the one place where failure payloads are probed by shape.

use super::{names, Failure};
use serde_json::{Map, Value};

/// Error code the HTTP client sets when it aborts a request on timeout.
const ABORTED_CODE: &str = "ECONNABORTED";

pub(super) fn from_value(value: Value) -> Failure {
    match value {
        Value::String(s) => Failure::Text(s),
        Value::Object(map) => from_object(map),
        other => Failure::Opaque {
            message: None,
            payload: other,
        },
    }
}

fn from_object(map: Map<String, Value>) -> Failure {
    if let Some(status) = response_status(&map) {
        let body = map
            .get("response")
            .and_then(|r| r.get("data").or_else(|| r.get("body")))
            .cloned()
            .unwrap_or(Value::Null);
        return Failure::Response { status, body };
    }

    if let Some(request) = present(&map, "request") {
        return Failure::NoResponse {
            request: request.clone(),
        };
    }

    let message = string_field(&map, "message");

    if string_field(&map, "code").as_deref() == Some(ABORTED_CODE) {
        return Failure::Exception {
            name: names::ABORT.to_string(),
            message: message.unwrap_or_else(|| "request aborted".to_string()),
            stack: string_field(&map, "stack"),
        };
    }

    match string_field(&map, "name").filter(|n| !n.is_empty()) {
        Some(name) => Failure::Exception {
            name,
            message: message.unwrap_or_default(),
            stack: string_field(&map, "stack"),
        },
        None => Failure::Opaque {
            message,
            payload: Value::Object(map),
        },
    }
}

/// Status of a `response` object, if it has a numeric one in `u16` range.
fn response_status(map: &Map<String, Value>) -> Option<u16> {
    present(map, "response")?
        .get("status")?
        .as_u64()
        .and_then(|s| u16::try_from(s).ok())
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null() && *v != &Value::Bool(false))
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}
