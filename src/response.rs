//! Normalization of webhook response bodies.

use reqwest::StatusCode;
use serde_json::{Map, Value};

/// Workflow webhooks commonly wrap a single item in an array. Unwrap arrays of
/// exactly one element; every other value is returned unchanged.
pub fn unwrap_singleton(data: Value) -> Value {
    match data {
        Value::Array(mut items) if items.len() == 1 => items.pop().unwrap_or(Value::Null),
        other => other,
    }
}

/// Interpret an error response body. JSON bodies are kept as-is; anything
/// else becomes `{"message": <raw text>}`.
pub fn error_data_from_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| {
        let mut map = Map::new();
        map.insert("message".to_string(), Value::String(body.to_string()));
        Value::Object(map)
    })
}

/// Pick the message for a failed request: the payload's `message` when it
/// carries something meaningful, otherwise the HTTP status.
pub fn error_message(error_data: &Value, status: StatusCode) -> String {
    match error_data.get("message") {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        Some(Value::Number(number)) if number.as_f64() != Some(0.0) => number.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(value @ (Value::Array(_) | Value::Object(_))) => value.to_string(),
        _ => format!("HTTP error! status: {}", status.as_u16()),
    }
}
