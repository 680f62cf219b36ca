//! Job resource extension definition.

use std::sync::Arc;

use async_trait::async_trait;

use tfdkron_protocols::error::ExtensionError;
use tfdkron_protocols::extension::{Extension, ExtensionContext, ExtensionManifest};

use crate::resource::DkronJobResource;
use crate::schema::RESOURCE_TYPE;

/// Extension registering the `dkron_job` resource.
pub struct JobResourceExtension {
    manifest: ExtensionManifest,
}

impl JobResourceExtension {
    pub fn new() -> Self {
        let manifest = ExtensionManifest::new("resource-job", "Dkron Job Resource", env!("CARGO_PKG_VERSION"))
            .with_description("Manage Dkron jobs as declarative resources")
            .with_resource(RESOURCE_TYPE);

        Self { manifest }
    }
}

impl Default for JobResourceExtension {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extension for JobResourceExtension {
    fn manifest(&self) -> &ExtensionManifest {
        &self.manifest
    }

    async fn initialize(&mut self, ctx: ExtensionContext) -> Result<(), ExtensionError> {
        ctx.resource_registry
            .register_resource(Arc::new(DkronJobResource::new()))?;
        tracing::debug!(extension = %self.manifest.id, "Registered resources");
        Ok(())
    }
}
