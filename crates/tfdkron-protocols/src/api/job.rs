//! Wire representation of a Dkron job.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Processor configuration: plain string key/value pairs.
pub type Processor = BTreeMap<String, String>;

/// Job body as sent to and returned by the Dkron API.
///
/// Zero values are left out of the serialized body, and explicit `null`s in a
/// response read as zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub timezone: String,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub schedule: String,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub owner: String,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub owner_email: String,

    /// Read-only, maintained by the server.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub success_count: i64,

    /// Read-only, maintained by the server.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub error_count: i64,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_false")]
    pub disabled: bool,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub retries: i64,

    /// Read-only, derived by the server from other jobs' `parent_job`.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub dependent_jobs: Vec<String>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub parent_job: String,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub concurrency: String,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub executor: String,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "BTreeMap::is_empty")]
    pub executor_config: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub displayname: String,

    /// Processor name (its type) to processor configuration.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "BTreeMap::is_empty")]
    pub processors: BTreeMap<String, Processor>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_false")]
    pub ephemeral: bool,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}
