//! Resource trait definition.

use async_trait::async_trait;

use super::{ResourceContext, ResourceData};
use crate::error::ResourceError;
use crate::schema::ResourceSchema;

/// Core trait for resources.
///
/// Operations mutate `data` only after the external call succeeded; on error
/// the host discards `data` and keeps its previous state.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Returns the resource schema.
    fn schema(&self) -> &ResourceSchema;

    /// Resource type name.
    fn type_name(&self) -> &str {
        &self.schema().type_name
    }

    async fn create(&self, ctx: &ResourceContext, data: &mut ResourceData) -> Result<(), ResourceError>;

    async fn read(&self, ctx: &ResourceContext, data: &mut ResourceData) -> Result<(), ResourceError>;

    async fn update(&self, ctx: &ResourceContext, data: &mut ResourceData) -> Result<(), ResourceError>;

    async fn delete(&self, ctx: &ResourceContext, data: &mut ResourceData) -> Result<(), ResourceError>;

    /// Adopt an existing remote object by identity.
    async fn import(
        &self,
        ctx: &ResourceContext,
        id: &str,
        data: &mut ResourceData,
    ) -> Result<(), ResourceError> {
        data.set_id(id);
        self.read(ctx, data).await
    }
}
