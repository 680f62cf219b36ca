//! Error types for the tfdkron protocol layer.

mod api;
mod diagnostic;
mod extension;
mod resource;

pub use api::*;
pub use diagnostic::*;
pub use extension::*;
pub use resource::*;
