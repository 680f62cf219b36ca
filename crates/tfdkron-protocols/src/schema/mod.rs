//! Resource schema definitions.
//!
//! A schema describes the attributes a resource accepts: their value types,
//! whether they must be present, and any value validation.

mod definition;
mod validate;

pub use definition::*;
