//! # tfdkron Protocols
//!
//! Contracts shared between the provider host and its resources.
//! Contains only interface definitions and the plain data they exchange.
//!
//! ## Core Traits
//!
//! - [`Resource`] - CRUD lifecycle of one declarative resource type
//! - [`JobsApi`] - Job endpoints of the Dkron REST API
//! - [`Extension`] - Unit that registers resources with the host

pub mod api;
pub mod error;
pub mod extension;
pub mod resource;
pub mod schema;

pub use api::{Job, JobsApi, Processor};
pub use error::{
    ApiError, Diagnostic, Diagnostics, ExtensionError, ResourceError, Severity,
};
pub use extension::{Extension, ExtensionContext, ExtensionManifest, ResourceRegistryAccess};
pub use resource::{Resource, ResourceContext, ResourceData, ResourceState};
pub use schema::{ResourceSchema, Schema, ValueType, Validator};
