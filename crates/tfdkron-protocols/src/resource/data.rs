//! Attribute access for one resource instance during an operation.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::ResourceState;
use crate::error::ResourceError;

/// Prior state, planned attributes and identity of one resource instance.
///
/// Getters read the planned attributes and return the type's zero value when
/// an attribute is absent or null.
#[derive(Debug, Clone, Default)]
pub struct ResourceData {
    id: Option<String>,
    prior: Map<String, Value>,
    attributes: Map<String, Value>,
}

impl ResourceData {
    /// Data for a resource that does not exist yet.
    pub fn new(config: Map<String, Value>) -> Self {
        Self {
            id: None,
            prior: Map::new(),
            attributes: config,
        }
    }

    /// Data for an existing resource, planned attributes equal to the state.
    pub fn from_state(state: &ResourceState) -> Self {
        Self {
            id: Some(state.id.clone()),
            prior: state.attributes.clone(),
            attributes: state.attributes.clone(),
        }
    }

    /// Data for an existing resource that is only known by identity.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Replace the planned attributes, keeping prior state and identity.
    pub fn with_config(mut self, config: Map<String, Value>) -> Self {
        self.attributes = config;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn clear_id(&mut self) {
        self.id = None;
    }

    /// Raw planned value, ignoring nulls.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    pub fn get_string(&self, key: &str) -> Result<String, ResourceError> {
        match self.get(key) {
            None => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(ResourceError::invalid_attribute(key, "expected a string")),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ResourceError> {
        match self.get(key) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(ResourceError::invalid_attribute(key, "expected a bool")),
        }
    }

    pub fn get_int(&self, key: &str) -> Result<i64, ResourceError> {
        match self.get(key) {
            None => Ok(0),
            Some(value) => value
                .as_i64()
                .ok_or_else(|| ResourceError::invalid_attribute(key, "expected an integer")),
        }
    }

    /// A map attribute whose values must all be strings.
    pub fn get_string_map(&self, key: &str) -> Result<BTreeMap<String, String>, ResourceError> {
        match self.get(key) {
            None => Ok(BTreeMap::new()),
            Some(Value::Object(entries)) => string_map(entries, key),
            Some(_) => Err(ResourceError::invalid_attribute(key, "expected a map")),
        }
    }

    pub fn get_list(&self, key: &str) -> Result<Vec<Value>, ResourceError> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(_) => Err(ResourceError::invalid_attribute(key, "expected a list")),
        }
    }

    /// Prior and planned value of an attribute.
    pub fn get_change(&self, key: &str) -> (Option<&Value>, Option<&Value>) {
        let old = self.prior.get(key).filter(|v| !v.is_null());
        (old, self.get(key))
    }

    pub fn has_change(&self, key: &str) -> bool {
        let (old, new) = self.get_change(key);
        old != new
    }

    /// Store a value as the attribute's new state.
    pub fn set<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> Result<(), ResourceError> {
        self.attributes.insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Resulting state, or `None` once the identity has been cleared.
    pub fn into_state(self, type_name: impl Into<String>) -> Option<ResourceState> {
        let id = self.id?;
        Some(ResourceState::new(type_name, id).with_attributes(self.attributes))
    }
}

/// Convert a generic object into a string-keyed string map.
pub fn string_map(
    entries: &Map<String, Value>,
    attribute: &str,
) -> Result<BTreeMap<String, String>, ResourceError> {
    entries
        .iter()
        .map(|(k, v)| match v {
            Value::String(s) => Ok((k.clone(), s.clone())),
            _ => Err(ResourceError::invalid_attribute(
                format!("{}.{}", attribute, k),
                "expected a string",
            )),
        })
        .collect()
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
