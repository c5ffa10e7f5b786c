//! Primitive checkers narrowing raw JSON argument values.
//!
//! Every checker either returns the value narrowed to its Rust type or an
//! [`TrelloError::InvalidParams`] naming the field. The optional variants take
//! `None` to mean "key absent from the mapping"; a present `null`, `""`, `0`
//! or `[]` is a value like any other and must pass its type check.

use serde_json::Value;

use crate::error::{Result, TrelloError};

/// Narrow `value` to a string.
pub fn check_string(value: &Value, field: &str) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(TrelloError::invalid_params(format!(
            "{field} must be a string"
        ))),
    }
}

/// Narrow an optional value to a string.
pub fn check_optional_string(value: Option<&Value>, field: &str) -> Result<Option<String>> {
    value.map(|v| check_string(v, field)).transpose()
}

/// Narrow `value` to a number.
pub fn check_number(value: &Value, field: &str) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| TrelloError::invalid_params(format!("{field} must be a number")))
}

/// Narrow an optional value to a number.
pub fn check_optional_number(value: Option<&Value>, field: &str) -> Result<Option<f64>> {
    value.map(|v| check_number(v, field)).transpose()
}

/// Narrow `value` to an ordered list of strings. An empty array is valid.
pub fn check_string_array(value: &Value, field: &str) -> Result<Vec<String>> {
    let invalid = || TrelloError::invalid_params(format!("{field} must be an array of strings"));

    let items = value.as_array().ok_or_else(invalid)?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_owned).ok_or_else(invalid))
        .collect()
}

/// Narrow an optional value to an ordered list of strings.
pub fn check_optional_string_array(
    value: Option<&Value>,
    field: &str,
) -> Result<Option<Vec<String>>> {
    value.map(|v| check_string_array(v, field)).transpose()
}

/// Parse `raw` as an absolute URL.
pub fn check_url(raw: &str, field: &str) -> Result<reqwest::Url> {
    reqwest::Url::parse(raw)
        .map_err(|_| TrelloError::invalid_params(format!("{field} must be a valid URL")))
}
