//! Lifecycle host for registered resources.

use serde_json::{Map, Value};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use tfdkron_client::DkronClient;
use tfdkron_config::ProviderConfig;
use tfdkron_protocols::api::JobsApi;
use tfdkron_protocols::error::{Diagnostic, Diagnostics, ExtensionError};
use tfdkron_protocols::extension::{Extension, ExtensionContext};
use tfdkron_protocols::resource::{Resource, ResourceContext, ResourceData, ResourceState};
use tfdkron_protocols::schema::ResourceSchema;

use crate::registry::ResourceRegistry;

/// Runs create, read, update, delete and import for registered resources.
///
/// Every failure is reported as [`Diagnostics`]. The caller's state is never
/// modified on error, so keeping the previous state is always safe.
pub struct ProviderHost {
    api: Arc<dyn JobsApi>,
    resources: Arc<ResourceRegistry>,
}

impl ProviderHost {
    pub fn new(api: Arc<dyn JobsApi>) -> Self {
        Self {
            api,
            resources: Arc::new(ResourceRegistry::new()),
        }
    }

    /// Host talking to the Dkron server named in the provider configuration.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, Diagnostics> {
        let client = DkronClient::from_config(config).map_err(|e| {
            Diagnostic::error("Invalid provider configuration")
                .with_detail(e.to_string())
                .with_attribute("host")
        })?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn registry(&self) -> &Arc<ResourceRegistry> {
        &self.resources
    }

    /// Initialize an extension against this host's registry.
    pub async fn load_extension(&self, extension: &mut dyn Extension) -> Result<(), ExtensionError> {
        let manifest = extension.manifest();
        info!("Loading extension: {} v{}", manifest.id, manifest.version);
        let ctx = ExtensionContext::new(self.resources.clone());
        extension.initialize(ctx).await
    }

    pub fn schemas(&self) -> Vec<ResourceSchema> {
        self.resources.schemas()
    }

    /// Check a configuration against the schema of its resource type.
    pub fn validate(&self, type_name: &str, config: &Value) -> Diagnostics {
        match self.resource(type_name) {
            Ok(resource) => resource.schema().validate(config),
            Err(diags) => diags,
        }
    }

    pub async fn create(
        &self,
        type_name: &str,
        config: &Value,
        cancel: &CancellationToken,
    ) -> Result<ResourceState, Diagnostics> {
        let resource = self.resource(type_name)?;
        let config = checked_config(resource.as_ref(), config)?;
        let ctx = self.context(cancel);
        debug!(correlation_id = %ctx.correlation_id, "Creating {}", type_name);

        let mut data = ResourceData::new(config);
        resource.create(&ctx, &mut data).await?;
        finish(data, type_name, "create")
    }

    pub async fn read(
        &self,
        state: &ResourceState,
        cancel: &CancellationToken,
    ) -> Result<ResourceState, Diagnostics> {
        let resource = self.resource(&state.type_name)?;
        let ctx = self.context(cancel);
        debug!(correlation_id = %ctx.correlation_id, "Reading {} {}", state.type_name, state.id);

        let mut data = ResourceData::from_state(state);
        resource.read(&ctx, &mut data).await?;
        finish(data, &state.type_name, "read")
    }

    pub async fn update(
        &self,
        state: &ResourceState,
        config: &Value,
        cancel: &CancellationToken,
    ) -> Result<ResourceState, Diagnostics> {
        let resource = self.resource(&state.type_name)?;
        let config = checked_config(resource.as_ref(), config)?;
        let ctx = self.context(cancel);
        debug!(correlation_id = %ctx.correlation_id, "Updating {} {}", state.type_name, state.id);

        let mut data = ResourceData::from_state(state).with_config(config);
        resource.update(&ctx, &mut data).await?;
        finish(data, &state.type_name, "update")
    }

    pub async fn delete(
        &self,
        state: &ResourceState,
        cancel: &CancellationToken,
    ) -> Result<(), Diagnostics> {
        let resource = self.resource(&state.type_name)?;
        let ctx = self.context(cancel);
        debug!(correlation_id = %ctx.correlation_id, "Deleting {} {}", state.type_name, state.id);

        let mut data = ResourceData::from_state(state);
        resource.delete(&ctx, &mut data).await?;
        if data.id().is_some() {
            warn!("{} {} still has an identity after delete", state.type_name, state.id);
        }
        Ok(())
    }

    pub async fn import(
        &self,
        type_name: &str,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<ResourceState, Diagnostics> {
        let resource = self.resource(type_name)?;
        let ctx = self.context(cancel);
        debug!(correlation_id = %ctx.correlation_id, "Importing {} {}", type_name, id);

        let mut data = ResourceData::default();
        resource.import(&ctx, id, &mut data).await?;
        finish(data, type_name, "import")
    }

    fn resource(&self, type_name: &str) -> Result<Arc<dyn Resource>, Diagnostics> {
        self.resources.get(type_name).ok_or_else(|| {
            Diagnostic::error(format!("Unknown resource type: {}", type_name))
                .with_detail(format!(
                    "Supported resource types: {}",
                    self.resources.type_names().join(", ")
                ))
                .into()
        })
    }

    fn context(&self, cancel: &CancellationToken) -> ResourceContext {
        ResourceContext::new(self.api.clone()).with_cancel(cancel.clone())
    }
}

fn checked_config(resource: &dyn Resource, config: &Value) -> Result<Map<String, Value>, Diagnostics> {
    let diags = resource.schema().validate(config);
    if diags.has_error() {
        return Err(diags);
    }
    for warning in diags.warnings() {
        warn!("{}", warning);
    }
    Ok(config.as_object().cloned().unwrap_or_default())
}

fn finish(data: ResourceData, type_name: &str, operation: &str) -> Result<ResourceState, Diagnostics> {
    data.into_state(type_name).ok_or_else(|| {
        Diagnostic::error(format!("Provider returned no identity after {}", operation))
            .with_detail(format!("The {} resource must set an ID when {} succeeds", type_name, operation))
            .into()
    })
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
