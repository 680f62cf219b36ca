//! Schema model types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Primitive or collection type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Bool,
    Int,
    Map,
    List,
}

impl ValueType {
    /// Value an absent attribute of this type reads as.
    pub fn zero_value(&self) -> Value {
        match self {
            ValueType::String => Value::String(String::new()),
            ValueType::Bool => Value::Bool(false),
            ValueType::Int => Value::from(0),
            ValueType::Map => Value::Object(Default::default()),
            ValueType::List => Value::Array(Vec::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Map => "map",
            ValueType::List => "list",
        }
    }
}

/// Value validation attached to a string attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    StringInSlice {
        values: Vec<String>,
        #[serde(default)]
        ignore_case: bool,
    },
}

impl Validator {
    pub fn string_in_slice(values: &[&str], ignore_case: bool) -> Self {
        Validator::StringInSlice {
            values: values.iter().map(|v| v.to_string()).collect(),
            ignore_case,
        }
    }

    /// Check a value, returning a human-readable message on failure.
    pub fn check(&self, value: &str) -> Result<(), String> {
        match self {
            Validator::StringInSlice {
                values,
                ignore_case,
            } => {
                let found = values.iter().any(|allowed| {
                    if *ignore_case {
                        allowed.eq_ignore_ascii_case(value)
                    } else {
                        allowed == value
                    }
                });
                if found {
                    Ok(())
                } else {
                    Err(format!(
                        "expected to be one of [{}], got \"{}\"",
                        values.join(", "),
                        value
                    ))
                }
            }
        }
    }
}

/// Element type of a map or list attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Elem {
    /// Elements are plain values of the given type.
    Type(ValueType),
    /// Elements are nested blocks with their own attributes.
    Block(BTreeMap<String, Schema>),
}

/// Schema of a single attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub value_type: ValueType,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elem: Option<Elem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<Validator>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Schema {
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            required: false,
            optional: false,
            elem: None,
            validator: None,
            description: None,
        }
    }

    pub fn string() -> Self {
        Self::new(ValueType::String)
    }

    pub fn bool() -> Self {
        Self::new(ValueType::Bool)
    }

    pub fn int() -> Self {
        Self::new(ValueType::Int)
    }

    /// A map whose values all have the given type.
    pub fn map_of(elem: ValueType) -> Self {
        let mut schema = Self::new(ValueType::Map);
        schema.elem = Some(Elem::Type(elem));
        schema
    }

    /// A list of nested blocks.
    pub fn list_of_block(attributes: BTreeMap<String, Schema>) -> Self {
        let mut schema = Self::new(ValueType::List);
        schema.elem = Some(Elem::Block(attributes));
        schema
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self.required = false;
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn zero_value(&self) -> Value {
        self.value_type.zero_value()
    }

    /// Nested block attributes, when this is a list of blocks.
    pub fn block(&self) -> Option<&BTreeMap<String, Schema>> {
        match &self.elem {
            Some(Elem::Block(attributes)) => Some(attributes),
            _ => None,
        }
    }
}

/// Schema of a whole resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// Resource type name, e.g. `dkron_job`.
    pub type_name: String,

    #[serde(default)]
    pub description: String,

    pub attributes: BTreeMap<String, Schema>,
}

impl ResourceSchema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            description: String::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.attributes.insert(name.into(), schema);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Schema> {
        self.attributes.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values() {
        assert_eq!(ValueType::String.zero_value(), Value::String(String::new()));
        assert_eq!(ValueType::Bool.zero_value(), Value::Bool(false));
        assert_eq!(ValueType::Int.zero_value(), Value::from(0));
        assert!(ValueType::Map.zero_value().as_object().unwrap().is_empty());
        assert!(ValueType::List.zero_value().as_array().unwrap().is_empty());
    }

    #[test]
    fn test_string_in_slice() {
        let v = Validator::string_in_slice(&["files", "log", "syslog"], false);
        assert!(v.check("log").is_ok());
        let err = v.check("LOG").unwrap_err();
        assert!(err.contains("files, log, syslog"));
        assert!(err.contains("\"LOG\""));
    }

    #[test]
    fn test_string_in_slice_ignore_case() {
        let v = Validator::string_in_slice(&["shell"], true);
        assert!(v.check("SHELL").is_ok());
    }

    #[test]
    fn test_required_and_optional_are_exclusive() {
        let s = Schema::string().optional().required();
        assert!(s.required);
        assert!(!s.optional);
    }

    #[test]
    fn test_block_accessor() {
        let mut attrs = BTreeMap::new();
        attrs.insert("type".to_string(), Schema::string().required());
        let list = Schema::list_of_block(attrs);
        assert!(list.block().unwrap().contains_key("type"));
        assert!(Schema::map_of(ValueType::String).block().is_none());
    }

    #[test]
    fn test_schema_serializes_type_key() {
        let schema = ResourceSchema::new("dkron_job")
            .with_attribute("name", Schema::string().required());
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["type_name"], "dkron_job");
        assert_eq!(json["attributes"]["name"]["type"], "string");
        assert_eq!(json["attributes"]["name"]["required"], true);
        assert!(json["attributes"]["name"].get("validator").is_none());
    }
}
