//! JSON Schema construction for tool input parameters.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// JSON Schema-based parameter definition for a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameters {
    /// JSON Schema object describing the parameters.
    pub schema: Value,
}

impl ToolParameters {
    /// Create an empty parameter schema (no parameters).
    pub fn empty() -> Self {
        Self::object().build()
    }

    /// Builder: create an object schema with properties.
    pub fn object() -> ParameterBuilder {
        ParameterBuilder {
            properties: Map::new(),
            required: Vec::new(),
        }
    }

    /// Names listed under `required`, in declaration order.
    pub fn required(&self) -> Vec<&str> {
        self.schema["required"]
            .as_array()
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// The schema as a JSON object map.
    pub fn as_object(&self) -> Map<String, Value> {
        self.schema.as_object().cloned().unwrap_or_default()
    }
}

/// Builder for constructing tool parameter schemas.
pub struct ParameterBuilder {
    properties: Map<String, Value>,
    required: Vec<String>,
}

impl ParameterBuilder {
    /// Add a string property.
    pub fn string(self, name: &str, description: &str, required: bool) -> Self {
        self.property(name, json!({ "type": "string", "description": description }), required)
    }

    /// Add a number property.
    pub fn number(self, name: &str, description: &str, required: bool) -> Self {
        self.property(name, json!({ "type": "number", "description": description }), required)
    }

    /// Add an array-of-strings property.
    pub fn string_array(self, name: &str, description: &str, required: bool) -> Self {
        self.property(
            name,
            json!({
                "type": "array",
                "items": { "type": "string" },
                "description": description,
            }),
            required,
        )
    }

    /// Add a string property constrained to `values`.
    pub fn string_enum(self, name: &str, description: &str, values: &[&str], required: bool) -> Self {
        self.property(
            name,
            json!({ "type": "string", "description": description, "enum": values }),
            required,
        )
    }

    fn property(mut self, name: &str, schema: Value, required: bool) -> Self {
        self.properties.insert(name.to_string(), schema);
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Build into ToolParameters.
    pub fn build(self) -> ToolParameters {
        ToolParameters {
            schema: json!({
                "type": "object",
                "properties": self.properties,
                "required": self.required,
            }),
        }
    }
}
