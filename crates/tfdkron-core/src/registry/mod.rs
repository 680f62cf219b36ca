//! Registries.

mod base;
mod resource;

pub use base::{BaseRegistry, Registerable};
pub use resource::ResourceRegistry;
