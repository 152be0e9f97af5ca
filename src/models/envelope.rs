// src/models/envelope.rs

use serde_json::Value;

/// Normalized form of an `api.php` response.
///
/// Most endpoints answer `{"status": "success", "data": ...}`; a few answer
/// `{"success": true, ...}`; result lookups return the payload at the top level.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEnvelope {
    pub ok: bool,
    pub message: Option<String>,
    /// `data` when present, otherwise the whole response.
    pub body: Value,
}

impl ApiEnvelope {
    pub fn from_value(value: Value) -> Self {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Self {
                    ok: true,
                    message: None,
                    body: other,
                };
            }
        };

        let ok = match (map.get("status"), map.get("success")) {
            (Some(status), _) => flag(status).unwrap_or(true),
            (None, Some(success)) => flag(success).unwrap_or(true),
            (None, None) => true,
        };

        let message = ["message", "msg", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_owned);

        let body = match map.remove("data") {
            Some(data) if !data.is_null() => data,
            _ => Value::Object(map),
        };

        Self { ok, message, body }
    }
}

/// Interprets a status-like field. `None` when the value says nothing either way.
fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|v| v != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "success" | "ok" | "true" | "1" => Some(true),
            "error" | "fail" | "failed" | "failure" | "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
