//! Lambda-proxy style envelopes.
//!
//! Some endpoints answer with `{ "body": "<JSON string>" }` instead of the payload itself.

use serde_json::Value;

use crate::error::ClientError;

/// Return the payload inside an envelope, or the value unchanged when it is not one.
pub fn unwrap(value: Value) -> Result<Value, ClientError> {
    match value {
        Value::Object(mut map) => match map.remove("body") {
            Some(Value::String(raw)) => serde_json::from_str(&raw)
                .map_err(|e| ClientError::Decode(format!("Invalid envelope body: {}", e))),
            Some(body) => Ok(body),
            None => Ok(Value::Object(map)),
        },
        other => Ok(other),
    }
}
