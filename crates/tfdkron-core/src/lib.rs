//! # tfdkron Core
//!
//! Host side of the provider: keeps the registered resource types and runs
//! their lifecycle operations, reporting every failure as diagnostics.

pub mod host;
pub mod registry;

pub use host::ProviderHost;
pub use registry::ResourceRegistry;
