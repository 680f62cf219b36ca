//! Configuration validation against a resource schema.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::{Elem, ResourceSchema, Schema, ValueType};
use crate::error::{Diagnostic, Diagnostics};

impl ResourceSchema {
    /// Validate a configuration object, collecting every problem found.
    pub fn validate(&self, config: &Value) -> Diagnostics {
        let mut diags = Diagnostics::new();
        match config.as_object() {
            Some(object) => validate_block(&self.attributes, object, "", &mut diags),
            None => diags.push(Diagnostic::error(format!(
                "Configuration for {} must be an object",
                self.type_name
            ))),
        }
        diags
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn validate_block(
    attributes: &BTreeMap<String, Schema>,
    object: &Map<String, Value>,
    prefix: &str,
    diags: &mut Diagnostics,
) {
    for (name, schema) in attributes {
        let path = join(prefix, name);
        match object.get(name) {
            None | Some(Value::Null) => {
                if schema.required {
                    diags.push(
                        Diagnostic::error("Missing required argument")
                            .with_detail(format!("The argument \"{}\" is required.", name))
                            .with_attribute(path),
                    );
                }
            }
            Some(value) => validate_value(schema, value, &path, diags),
        }
    }

    for key in object.keys() {
        if !attributes.contains_key(key) {
            diags.push(
                Diagnostic::error("Unsupported argument")
                    .with_detail(format!("An argument named \"{}\" is not expected here.", key))
                    .with_attribute(join(prefix, key)),
            );
        }
    }
}

fn type_mismatch(expected: ValueType, path: &str) -> Diagnostic {
    Diagnostic::error("Incorrect attribute value type")
        .with_detail(format!("Expected a value of type {}.", expected.name()))
        .with_attribute(path)
}

fn validate_value(schema: &Schema, value: &Value, path: &str, diags: &mut Diagnostics) {
    match schema.value_type {
        ValueType::String => match value.as_str() {
            Some(s) => {
                if let Some(validator) = &schema.validator {
                    if let Err(message) = validator.check(s) {
                        diags.push(
                            Diagnostic::error("Invalid value")
                                .with_detail(message)
                                .with_attribute(path),
                        );
                    }
                }
            }
            None => diags.push(type_mismatch(ValueType::String, path)),
        },
        ValueType::Bool => {
            if !value.is_boolean() {
                diags.push(type_mismatch(ValueType::Bool, path));
            }
        }
        ValueType::Int => {
            if value.as_i64().is_none() {
                diags.push(type_mismatch(ValueType::Int, path));
            }
        }
        ValueType::Map => match value.as_object() {
            Some(entries) => {
                if let Some(Elem::Type(elem)) = &schema.elem {
                    let elem_schema = Schema::new(*elem);
                    for (key, item) in entries {
                        validate_value(&elem_schema, item, &join(path, key), diags);
                    }
                }
            }
            None => diags.push(type_mismatch(ValueType::Map, path)),
        },
        ValueType::List => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = join(path, &i.to_string());
                    match &schema.elem {
                        Some(Elem::Block(attributes)) => match item.as_object() {
                            Some(object) => validate_block(attributes, object, &item_path, diags),
                            None => diags.push(
                                Diagnostic::error("Incorrect attribute value type")
                                    .with_detail("Expected a block object.")
                                    .with_attribute(item_path),
                            ),
                        },
                        Some(Elem::Type(elem)) => {
                            validate_value(&Schema::new(*elem), item, &item_path, diags)
                        }
                        None => {}
                    }
                }
            }
            None => diags.push(type_mismatch(ValueType::List, path)),
        },
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
