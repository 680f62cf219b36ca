//! Conversion between `dkron_job` attributes and the API's job body.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use tfdkron_protocols::api::{Job, Processor};
use tfdkron_protocols::error::ResourceError;
use tfdkron_protocols::resource::ResourceData;

const PROCESSOR_TYPE_KEY: &str = "type";

/// Processor keys left out of the body when empty, and restored as empty
/// strings when read back.
const OMIT_IF_EMPTY: &[&str] = &["forward", "log_dir"];

/// Build the job body from planned attributes.
pub fn expand_job(data: &ResourceData) -> Result<Job, ResourceError> {
    Ok(Job {
        name: data.get_string("name")?,
        timezone: data.get_string("timezone")?,
        displayname: data.get_string("displayname")?,
        schedule: data.get_string("schedule")?,
        owner: data.get_string("owner")?,
        owner_email: data.get_string("owner_email")?,
        disabled: data.get_bool("disabled")?,
        tags: data.get_string_map("tags")?,
        retries: data.get_int("retries")?,
        parent_job: data.get_string("parent_job")?,
        concurrency: data.get_string("concurrency")?,
        executor: data.get_string("executor")?,
        executor_config: data.get_string_map("executor_config")?,
        metadata: data.get_string_map("metadata")?,
        processors: expand_processors(&data.get_list("processors")?)?,
        ephemeral: false,
        ..Default::default()
    })
}

/// Reshape the processor list into a map keyed by each entry's type.
///
/// The type key is removed from the entry; empty `forward`/`log_dir` values
/// are dropped. A repeated type replaces the earlier entry.
pub fn expand_processors(items: &[Value]) -> Result<BTreeMap<String, Processor>, ResourceError> {
    let mut processors = BTreeMap::new();

    for (i, item) in items.iter().enumerate() {
        let path = format!("processors.{}", i);
        let entry = item
            .as_object()
            .ok_or_else(|| ResourceError::invalid_attribute(&path, "expected a processor block"))?;

        let mut processor = Processor::new();
        for (key, value) in entry {
            match value {
                Value::Null => {}
                Value::String(s) => {
                    processor.insert(key.clone(), s.clone());
                }
                _ => {
                    return Err(ResourceError::invalid_attribute(
                        format!("{}.{}", path, key),
                        "expected a string",
                    ));
                }
            }
        }

        let processor_type = processor
            .remove(PROCESSOR_TYPE_KEY)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ResourceError::invalid_attribute(format!("{}.{}", path, PROCESSOR_TYPE_KEY), "type is required")
            })?;

        for key in OMIT_IF_EMPTY {
            if processor.get(*key).is_some_and(String::is_empty) {
                processor.remove(*key);
            }
        }

        if processors.insert(processor_type.clone(), processor).is_some() {
            tracing::warn!(processor = %processor_type, "Processor type listed more than once, keeping the last entry");
        }
    }

    Ok(processors)
}

/// Rebuild the processor list, reinserting each map key as the entry's type.
pub fn flatten_processors(processors: &BTreeMap<String, Processor>) -> Vec<Value> {
    processors
        .iter()
        .map(|(processor_type, config)| {
            let mut entry = Map::new();
            for key in OMIT_IF_EMPTY {
                entry.insert(key.to_string(), Value::String(String::new()));
            }
            for (key, value) in config {
                entry.insert(key.clone(), Value::String(value.clone()));
            }
            entry.insert(PROCESSOR_TYPE_KEY.to_string(), Value::String(processor_type.clone()));
            Value::Object(entry)
        })
        .collect()
}

/// Attribute values describing a job as returned by the API.
pub fn flatten_job(job: &Job) -> Result<Map<String, Value>, ResourceError> {
    let mut attributes = Map::new();
    attributes.insert("name".into(), Value::String(job.name.clone()));
    attributes.insert("timezone".into(), Value::String(job.timezone.clone()));
    attributes.insert("displayname".into(), Value::String(job.displayname.clone()));
    attributes.insert("schedule".into(), Value::String(job.schedule.clone()));
    attributes.insert("owner".into(), Value::String(job.owner.clone()));
    attributes.insert("owner_email".into(), Value::String(job.owner_email.clone()));
    attributes.insert("disabled".into(), Value::Bool(job.disabled));
    attributes.insert("tags".into(), serde_json::to_value(&job.tags)?);
    attributes.insert("retries".into(), Value::from(job.retries));
    attributes.insert("parent_job".into(), Value::String(job.parent_job.clone()));
    attributes.insert("concurrency".into(), Value::String(job.concurrency.clone()));
    attributes.insert("executor".into(), Value::String(job.executor.clone()));
    attributes.insert("executor_config".into(), serde_json::to_value(&job.executor_config)?);
    attributes.insert("metadata".into(), serde_json::to_value(&job.metadata)?);
    attributes.insert("processors".into(), Value::Array(flatten_processors(&job.processors)));
    Ok(attributes)
}

/// Copy a fetched job into the resource data.
///
/// Nothing is written unless every attribute converts.
pub fn apply_job(job: &Job, data: &mut ResourceData) -> Result<(), ResourceError> {
    for (key, value) in flatten_job(job)? {
        data.set(key, value)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "mapping_tests.rs"]
mod tests;
