//! Dkron API contract.
//!
//! The resource talks to the scheduler only through [`JobsApi`], so the
//! HTTP client can be swapped for a test double.

mod job;
mod traits;

pub use job::*;
pub use traits::*;
