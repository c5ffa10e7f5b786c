//! HTTP plumbing shared by client calls.

use reqwest::StatusCode;

use crate::error::TrelloError;

/// Map a non-success response to an error.
pub fn status_to_error(status: StatusCode, retry_after: Option<&str>, body: &str) -> TrelloError {
    let message = error_message(body);
    match status.as_u16() {
        401 | 403 => TrelloError::Authentication(message),
        404 => TrelloError::NotFound(message),
        429 => TrelloError::RateLimited {
            retry_after_secs: parse_retry_after(retry_after),
        },
        code => TrelloError::api(code, message),
    }
}

/// Pull a readable message out of a Trello error body.
///
/// Trello answers with either plain text (`invalid id`) or a JSON object with
/// `message` or `error`.
pub fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| trimmed.to_string())
}

/// Parse a `Retry-After` header value given in seconds.
pub fn parse_retry_after(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.trim().parse::<u64>().ok())
}

/// Render a JSON number as a query value, dropping a zero fraction.
pub fn number_param(value: f64) -> String {
    value.to_string()
}
