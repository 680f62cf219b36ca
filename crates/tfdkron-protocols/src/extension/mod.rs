//! Extension protocol definitions.
//!
//! Extensions are how resource types become known to the provider host.

mod context;
mod manifest;
mod traits;

pub use context::*;
pub use manifest::*;
pub use traits::*;
