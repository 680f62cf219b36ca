//! Resource protocol definitions.
//!
//! A resource maps one block of declarative configuration onto calls against
//! an external API.

mod context;
mod data;
mod state;
mod traits;

pub use context::*;
pub use data::*;
pub use state::*;
pub use traits::*;
