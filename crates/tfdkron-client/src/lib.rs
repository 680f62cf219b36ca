//! # tfdkron Client
//!
//! HTTP implementation of [`tfdkron_protocols::JobsApi`] against the Dkron
//! `/v1/jobs` endpoints.

mod client;

pub use client::{DkronClient, DEFAULT_TIMEOUT_SECS};
