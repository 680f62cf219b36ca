//! Schema of the `dkron_job` resource.

use std::collections::BTreeMap;

use tfdkron_protocols::schema::{ResourceSchema, Schema, ValueType, Validator};

pub const RESOURCE_TYPE: &str = "dkron_job";

/// Executor plugins a job may use.
pub const EXECUTORS: &[&str] = &["gcppubsub", "grpc", "http", "kafka", "nats", "rabbitmq", "shell"];

/// Processor plugins a job may attach.
pub const PROCESSOR_TYPES: &[&str] = &["files", "log", "syslog"];

fn processor_block() -> BTreeMap<String, Schema> {
    BTreeMap::from([
        (
            "type".to_string(),
            Schema::string()
                .required()
                .with_validator(Validator::string_in_slice(PROCESSOR_TYPES, false))
                .with_description("Processor plugin name"),
        ),
        (
            "forward".to_string(),
            Schema::string()
                .optional()
                .with_description("Forward the output to the next processor"),
        ),
        (
            "log_dir".to_string(),
            Schema::string()
                .optional()
                .with_description("Directory for the files processor"),
        ),
    ])
}

/// Build the `dkron_job` schema.
pub fn job_schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("A scheduled job in Dkron")
        .with_attribute("name", Schema::string().required().with_description("Job name and identity"))
        .with_attribute("timezone", Schema::string().optional())
        .with_attribute("displayname", Schema::string().optional())
        .with_attribute("schedule", Schema::string().required().with_description("Cron expression or @every interval"))
        .with_attribute("owner", Schema::string().optional())
        .with_attribute("owner_email", Schema::string().optional())
        .with_attribute("disabled", Schema::bool().optional())
        .with_attribute("tags", Schema::map_of(ValueType::String).optional())
        .with_attribute("retries", Schema::int().optional())
        .with_attribute("parent_job", Schema::string().optional())
        .with_attribute("concurrency", Schema::string().optional())
        .with_attribute(
            "executor",
            Schema::string()
                .required()
                .with_validator(Validator::string_in_slice(EXECUTORS, false)),
        )
        .with_attribute("executor_config", Schema::map_of(ValueType::String).optional())
        .with_attribute("metadata", Schema::map_of(ValueType::String).optional())
        .with_attribute("processors", Schema::list_of_block(processor_block()).optional())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_attributes() {
        let schema = job_schema();
        let mut required: Vec<&str> = schema
            .attributes
            .iter()
            .filter(|(_, s)| s.required)
            .map(|(name, _)| name.as_str())
            .collect();
        required.sort();
        assert_eq!(required, vec!["executor", "name", "schedule"]);
        assert_eq!(schema.attributes.len(), 15);
    }

    #[test]
    fn test_accepts_minimal_job() {
        let diags = job_schema().validate(&json!({
            "name": "backup",
            "schedule": "@every 1h",
            "executor": "shell"
        }));
        assert!(diags.is_empty(), "{}", diags);
    }

    #[test]
    fn test_every_executor_accepted() {
        for executor in EXECUTORS {
            let diags = job_schema().validate(&json!({
                "name": "a",
                "schedule": "@daily",
                "executor": executor
            }));
            assert!(diags.is_empty(), "{}: {}", executor, diags);
        }
    }

    #[test]
    fn test_rejects_unknown_executor() {
        let diags = job_schema().validate(&json!({
            "name": "a",
            "schedule": "@daily",
            "executor": "docker"
        }));
        assert!(diags.has_error());
        assert_eq!(diags.iter().next().unwrap().attribute.as_deref(), Some("executor"));
    }

    #[test]
    fn test_executor_is_case_sensitive() {
        let diags = job_schema().validate(&json!({
            "name": "a",
            "schedule": "@daily",
            "executor": "Shell"
        }));
        assert!(diags.has_error());
    }

    #[test]
    fn test_rejects_unknown_processor_type() {
        let diags = job_schema().validate(&json!({
            "name": "a",
            "schedule": "@daily",
            "executor": "shell",
            "processors": [{"type": "log"}, {"type": "slack"}]
        }));
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags.iter().next().unwrap().attribute.as_deref(),
            Some("processors.1.type")
        );
    }
}
