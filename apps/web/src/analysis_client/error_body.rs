//! Resolves the user-facing message for a non-2xx response.
//!
//! Strategies run in order and the first one that yields a message wins.

use serde_json::Value;

type Strategy = fn(u16, &str) -> Option<String>;

const STRATEGIES: &[Strategy] = &[structured_error, raw_text, status_line];

pub fn resolve_message(status: u16, body: &str) -> String {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(status, body))
        .unwrap_or_else(|| format!("HTTP {status}"))
}

/// `{"error": "..."}`, or the nested `{"error": {"message": "..."}}` shape.
fn structured_error(_status: u16, body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    let message = match error {
        Value::String(s) => s.as_str(),
        Value::Object(_) => error.get("message")?.as_str()?,
        _ => return None,
    };
    non_empty(message)
}

fn raw_text(_status: u16, body: &str) -> Option<String> {
    non_empty(body)
}

fn status_line(status: u16, _body: &str) -> Option<String> {
    Some(format!("HTTP {status}"))
}

/// Blank text yields nothing; anything else is returned as sent.
fn non_empty(text: &str) -> Option<String> {
    (!text.trim().is_empty()).then(|| text.to_string())
}
