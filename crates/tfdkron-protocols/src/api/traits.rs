//! Job API trait definition.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::Job;
use crate::error::ApiError;

/// Job endpoints of the scheduling service.
///
/// Each call is a single attempt. Implementations must stop waiting and
/// return [`ApiError::Cancelled`] once `cancel` fires.
#[async_trait]
pub trait JobsApi: Send + Sync {
    /// Create the job, or overwrite it entirely if the name already exists.
    async fn upsert_job(&self, job: &Job, cancel: &CancellationToken) -> Result<(), ApiError>;

    /// Fetch a job by name.
    async fn show_job(&self, name: &str, cancel: &CancellationToken) -> Result<Job, ApiError>;

    /// Delete a job by name.
    async fn delete_job(&self, name: &str, cancel: &CancellationToken) -> Result<(), ApiError>;
}
