//! Extension initialization context.

use std::sync::Arc;

use super::ResourceRegistryAccess;

/// Handles an extension receives when it is initialized.
#[derive(Clone)]
pub struct ExtensionContext {
    pub resource_registry: Arc<dyn ResourceRegistryAccess>,
}

impl ExtensionContext {
    pub fn new(resource_registry: Arc<dyn ResourceRegistryAccess>) -> Self {
        Self { resource_registry }
    }
}
