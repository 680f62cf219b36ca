//! Resource registry.

use std::sync::Arc;

use tfdkron_protocols::error::ExtensionError;
use tfdkron_protocols::extension::ResourceRegistryAccess;
use tfdkron_protocols::resource::Resource;
use tfdkron_protocols::schema::ResourceSchema;

use super::base::{BaseRegistry, Registerable};

impl Registerable for dyn Resource {
    fn registry_id(&self) -> &str {
        self.type_name()
    }
}

/// Registry of resource types by type name.
pub struct ResourceRegistry {
    inner: BaseRegistry<dyn Resource>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            inner: BaseRegistry::new(),
        }
    }

    pub fn register(&self, resource: Arc<dyn Resource>) -> Result<(), ExtensionError> {
        self.inner.register(resource)
    }

    pub fn unregister(&self, type_name: &str) -> Result<(), ExtensionError> {
        self.inner.unregister(type_name)
    }

    pub fn get(&self, type_name: &str) -> Option<Arc<dyn Resource>> {
        self.inner.get(type_name)
    }

    pub fn type_names(&self) -> Vec<String> {
        self.inner.list_ids()
    }

    /// Schemas of all registered resources, ordered by type name.
    pub fn schemas(&self) -> Vec<ResourceSchema> {
        self.type_names()
            .iter()
            .filter_map(|name| self.get(name))
            .map(|resource| resource.schema().clone())
            .collect()
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceRegistryAccess for ResourceRegistry {
    fn register_resource(&self, resource: Arc<dyn Resource>) -> Result<(), ExtensionError> {
        self.register(resource)
    }

    fn unregister_resource(&self, type_name: &str) -> Result<(), ExtensionError> {
        self.unregister(type_name)
    }
}
