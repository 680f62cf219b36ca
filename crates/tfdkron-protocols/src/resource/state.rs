//! Persisted resource state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What the host remembers about one managed resource instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Resource type name, e.g. `dkron_job`.
    pub type_name: String,

    /// External identity.
    pub id: String,

    /// Last known attribute values.
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl ResourceState {
    pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes = attributes;
        self
    }
}
