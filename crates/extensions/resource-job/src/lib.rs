//! # tfdkron Job Resource
//!
//! The `dkron_job` resource: one declarative block per Dkron job.
//!
//! The job name doubles as the resource identity, so renaming a job deletes
//! the old one before creating the new one.

pub mod extension;
pub mod mapping;
pub mod resource;
pub mod schema;

pub use extension::JobResourceExtension;
pub use resource::DkronJobResource;
pub use schema::{job_schema, EXECUTORS, PROCESSOR_TYPES, RESOURCE_TYPE};
