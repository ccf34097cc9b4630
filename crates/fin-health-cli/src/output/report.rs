use serde_json::Value;

use super::json;

/// Print a pre-rendered text report; anything else falls back to JSON.
pub fn print_report(value: &Value) {
    match value {
        Value::String(text) => print!("{}", text),
        _ => json::print_json(value),
    }
}
