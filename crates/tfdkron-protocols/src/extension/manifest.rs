//! Extension manifest types.

use serde::{Deserialize, Serialize};

/// Extension manifest containing metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub provides: Provides,
}

impl ExtensionManifest {
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            description: String::new(),
            provides: Provides::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_resource(mut self, type_name: impl Into<String>) -> Self {
        self.provides.resources.push(type_name.into());
        self
    }
}

/// What an extension contributes to the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Provides {
    /// Resource type names.
    #[serde(default)]
    pub resources: Vec<String>,
}
