//! Rendering of a message plus its auxiliary details into one line

use serde::Serialize;
use serde_json::Value;

/// Convert any serializable value into a detail.
///
/// Values serde cannot represent as JSON (maps with non-string keys, for
/// instance) become their error text instead of failing the log call.
pub fn to_detail<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|e| Value::String(format!("[unserializable: {}]", e)))
}

/// Strings are written as-is, everything else as compact JSON.
pub fn render_detail(detail: &Value) -> String {
    match detail {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `message` followed by each rendered detail, separated by single spaces
pub fn format_line(message: &str, details: &[Value]) -> String {
    if details.is_empty() {
        return message.to_string();
    }

    let mut line = String::with_capacity(message.len() + details.len() * 8);
    line.push_str(message);
    for detail in details {
        line.push(' ');
        line.push_str(&render_detail(detail));
    }
    line
}
