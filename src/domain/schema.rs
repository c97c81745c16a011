use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

/// Declared JSON type of a request-body property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
    /// Anything else, including a missing `type` keyword (stored as `""`).
    Other(String),
}

impl PropertyType {
    /// Read the `type` keyword of a schema node.
    ///
    /// OpenAPI 3.1 allows a list of types; the first non-`null` entry wins.
    pub fn from_schema(schema: &Value) -> Self {
        let declared = match schema.get("type") {
            Some(Value::String(name)) => name.as_str(),
            Some(Value::Array(names)) => names
                .iter()
                .filter_map(Value::as_str)
                .find(|name| *name != "null")
                .unwrap_or(""),
            _ => "",
        };
        Self::from_name(declared)
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => PropertyType::String,
            "integer" => PropertyType::Integer,
            "number" => PropertyType::Number,
            "boolean" => PropertyType::Boolean,
            "object" => PropertyType::Object,
            "array" => PropertyType::Array,
            other => PropertyType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::String => "string",
            PropertyType::Integer => "integer",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
            PropertyType::Object => "object",
            PropertyType::Array => "array",
            PropertyType::Other(name) => name,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Other(name) if name.is_empty() => f.write_str("any"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// One entry of a request-body schema's `properties`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    pub name: String,
    pub declared_type: PropertyType,
    pub description: Option<String>,
    pub required: bool,
    /// The property's schema node as found in the API description.
    pub raw: Value,
}

impl PropertySchema {
    pub fn from_value(name: impl Into<String>, raw: &Value, required: bool) -> Self {
        Self {
            name: name.into(),
            declared_type: PropertyType::from_schema(raw),
            description: raw
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            required,
            raw: raw.clone(),
        }
    }

    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.declared_type)
    }
}

/// The property set of an operation's JSON request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    pub properties: IndexMap<String, PropertySchema>,
}

impl ObjectSchema {
    /// Collect `properties` in document order. Schemas without properties
    /// (a bare array body, say) yield an empty set.
    pub fn from_value(schema: &Value) -> Self {
        let required: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let properties = schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, raw)| {
                        let property =
                            PropertySchema::from_value(name, raw, required.contains(&name.as_str()));
                        (name.clone(), property)
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { properties }
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }
}
