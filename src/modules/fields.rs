//! Field checks shared by the dish and order validation stages.

use grubdash_http::AppError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

pub static CONTAINS_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[a-z]").expect("letter pattern is valid"));

pub static CONTAINS_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]").expect("digit pattern is valid"));

/// A field counts as supplied unless it is missing, `null`, or `""`.
pub fn supplied<'a>(data: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    match data.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) if text.is_empty() => None,
        Some(value) => Some(value),
    }
}

/// The field as text, if it is a string matching `pattern`.
pub fn text_matching(data: &Map<String, Value>, key: &str, pattern: &Regex) -> Option<String> {
    match supplied(data, key) {
        Some(Value::String(text)) if pattern.is_match(text) => Some(text.clone()),
        _ => None,
    }
}

/// A JSON number with no fractional part that is greater than zero.
pub fn positive_integer(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return (n > 0).then_some(n);
    }
    // 5.0 is a whole number too
    let n = value.as_f64()?;
    (n > 0.0 && n.fract() == 0.0 && n < u64::MAX as f64).then(|| n as u64)
}

/// Reject a payload `id` that disagrees with the route id.
///
/// A falsy `id` (`0`, `false`, `null`, `""`) is treated as absent.
///
/// `kind` is the capitalized resource name used in the message.
pub fn ensure_route_id(
    data: &Map<String, Value>,
    route_id: &str,
    kind: &str,
) -> Result<(), AppError> {
    match supplied(data, "id") {
        None | Some(Value::Bool(false)) => Ok(()),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(()),
        Some(Value::String(id)) if id == route_id => Ok(()),
        Some(other) => {
            let shown = match other {
                Value::String(id) => id.clone(),
                value => value.to_string(),
            };
            Err(AppError::bad_request(format!(
                "{kind} id does not match route id. {kind}: {shown}, Route: {route_id}"
            )))
        }
    }
}
