//! Typed access to raw tool call arguments.

use serde_json::{Map, Value};

use super::validation;
use crate::error::{Result, TrelloError};

/// The untyped argument mapping delivered with a tool call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    map: Map<String, Value>,
}

impl ToolArguments {
    pub fn new(map: Map<String, Value>) -> Self {
        Self { map }
    }

    /// Build from an arbitrary JSON value.
    ///
    /// `null` and blank strings become an empty mapping; a string holding a
    /// JSON object is parsed. Anything else that is not an object is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self::new(map)),
            Value::String(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(Self::default());
                }
                let parsed: Value = serde_json::from_str(trimmed).map_err(|e| {
                    TrelloError::invalid_params(format!("arguments must be valid JSON: {e}"))
                })?;
                Self::from_value(parsed)
            }
            other => Err(TrelloError::invalid_params(format!(
                "arguments must be a JSON object; got {other}"
            ))),
        }
    }

    /// Get the raw mapping.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.map
    }

    /// Raw value for `key`, `None` when the key is absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Fail unless every field in `fields` is present.
    ///
    /// The message always lists the whole required set, not just the missing
    /// subset, e.g. `"cardId and memberId are required"`.
    pub fn require(&self, fields: &[&str]) -> Result<()> {
        if fields.iter().all(|field| self.contains(field)) {
            return Ok(());
        }
        Err(TrelloError::invalid_params(required_message(fields)))
    }

    /// Narrow a required string. Callers check presence with [`Self::require`] first.
    pub fn string(&self, key: &str) -> Result<String> {
        match self.get(key) {
            Some(value) => validation::check_string(value, key),
            None => Err(TrelloError::invalid_params(required_message(&[key]))),
        }
    }

    pub fn optional_string(&self, key: &str) -> Result<Option<String>> {
        validation::check_optional_string(self.get(key), key)
    }

    pub fn optional_number(&self, key: &str) -> Result<Option<f64>> {
        validation::check_optional_number(self.get(key), key)
    }

    pub fn optional_string_array(&self, key: &str) -> Result<Option<Vec<String>>> {
        validation::check_optional_string_array(self.get(key), key)
    }
}

impl From<Map<String, Value>> for ToolArguments {
    fn from(map: Map<String, Value>) -> Self {
        Self::new(map)
    }
}

fn required_message(fields: &[&str]) -> String {
    match fields {
        [] => "arguments are required".to_string(),
        [only] => format!("{only} is required"),
        [init @ .., last] => format!("{} and {last} are required", init.join(", ")),
    }
}
