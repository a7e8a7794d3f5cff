//! Best-effort interpretation of strings as JSON text.

use serde_json::Value;
use tracing::trace;

/// Try to read `text` as a JSON document.
///
/// Only objects, arrays and `null` count as JSON text. Anything else,
/// including text that is valid JSON for a number, a boolean or a quoted
/// string, is left to the caller to keep as a literal.
pub fn parse_json_text(text: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ (Value::Object(_) | Value::Array(_) | Value::Null)) => Some(value),
        Ok(other) => {
            trace!("text parses as a JSON scalar ({other}), keeping it literal");
            None
        }
        Err(e) => {
            trace!("text is not JSON ({e}), keeping it literal");
            None
        }
    }
}
