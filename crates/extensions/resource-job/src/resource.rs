//! The `dkron_job` resource.

use async_trait::async_trait;

use tfdkron_protocols::api::Job;
use tfdkron_protocols::error::ResourceError;
use tfdkron_protocols::resource::{Resource, ResourceContext, ResourceData};
use tfdkron_protocols::schema::ResourceSchema;

use crate::mapping::{apply_job, expand_job};
use crate::schema::job_schema;

/// CRUD adapter between `dkron_job` blocks and the Dkron jobs API.
pub struct DkronJobResource {
    schema: ResourceSchema,
}

impl DkronJobResource {
    pub fn new() -> Self {
        Self {
            schema: job_schema(),
        }
    }
}

impl Default for DkronJobResource {
    fn default() -> Self {
        Self::new()
    }
}

fn require_id(data: &ResourceData) -> Result<String, ResourceError> {
    data.id()
        .map(str::to_string)
        .ok_or(ResourceError::MissingId)
}

/// Upsert an already converted job and take its name as the identity.
async fn write(ctx: &ResourceContext, data: &mut ResourceData, job: Job) -> Result<(), ResourceError> {
    tracing::debug!(
        correlation_id = %ctx.correlation_id,
        job = %job.name,
        processors = job.processors.len(),
        "Writing job"
    );

    ctx.api().upsert_job(&job, &ctx.cancel).await?;

    data.set_id(job.name);
    Ok(())
}

#[async_trait]
impl Resource for DkronJobResource {
    fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    async fn create(&self, ctx: &ResourceContext, data: &mut ResourceData) -> Result<(), ResourceError> {
        let job = expand_job(data)?;
        write(ctx, data, job).await
    }

    async fn read(&self, ctx: &ResourceContext, data: &mut ResourceData) -> Result<(), ResourceError> {
        let id = require_id(data)?;
        let job = ctx.api().show_job(&id, &ctx.cancel).await?;
        apply_job(&job, data)
    }

    async fn update(&self, ctx: &ResourceContext, data: &mut ResourceData) -> Result<(), ResourceError> {
        let job = expand_job(data)?;
        if data.has_change("name") {
            // The name is the identity: remove the job under its old name first.
            let (old, new) = data.get_change("name");
            tracing::info!(
                correlation_id = %ctx.correlation_id,
                old = ?old,
                new = ?new,
                "Job renamed, recreating"
            );
            let id = require_id(data)?;
            match ctx.api().delete_job(&id, &ctx.cancel).await {
                Ok(()) => {}
                Err(e) if e.is_not_found() => {
                    tracing::warn!(job = %id, "Old job already gone, creating the renamed job");
                }
                Err(e) => return Err(e.into()),
            }
        }
        write(ctx, data, job).await
    }

    async fn delete(&self, ctx: &ResourceContext, data: &mut ResourceData) -> Result<(), ResourceError> {
        let id = require_id(data)?;
        ctx.api().delete_job(&id, &ctx.cancel).await?;
        data.clear_id();
        Ok(())
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
