//! Extension trait definition.

use async_trait::async_trait;
use std::sync::Arc;

use super::{ExtensionContext, ExtensionManifest};
use crate::error::ExtensionError;
use crate::resource::Resource;

/// Core trait for all extensions.
#[async_trait]
pub trait Extension: Send + Sync + 'static {
    /// Returns the extension manifest.
    fn manifest(&self) -> &ExtensionManifest;

    /// Initialize the extension, registering what it provides.
    async fn initialize(&mut self, ctx: ExtensionContext) -> Result<(), ExtensionError>;
}

/// Trait for accessing the resource registry from extensions.
pub trait ResourceRegistryAccess: Send + Sync {
    /// Register a resource type.
    fn register_resource(&self, resource: Arc<dyn Resource>) -> Result<(), ExtensionError>;

    /// Unregister a resource type.
    fn unregister_resource(&self, type_name: &str) -> Result<(), ExtensionError>;
}
