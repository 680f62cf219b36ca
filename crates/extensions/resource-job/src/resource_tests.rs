use super::*;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tfdkron_client::DkronClient;
use tfdkron_protocols::resource::ResourceState;

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn context(server: &MockServer) -> ResourceContext {
    ResourceContext::new(Arc::new(DkronClient::new(&server.uri()).unwrap()))
}

fn full_config() -> Map<String, Value> {
    object(json!({
        "name": "backup",
        "timezone": "UTC",
        "displayname": "Backup",
        "schedule": "@every 1h",
        "owner": "dba",
        "owner_email": "dba@example.com",
        "disabled": false,
        "tags": {"role": "db:1"},
        "retries": 2,
        "parent_job": "",
        "concurrency": "allow",
        "executor": "shell",
        "executor_config": {"command": "pg_dump"},
        "metadata": {"team": "storage"},
        "processors": [
            {"type": "files", "forward": "true", "log_dir": "/var/log/dkron"},
            {"type": "log", "forward": "", "log_dir": ""}
        ]
    }))
}

async fn requests(server: &MockServer) -> Vec<(String, String)> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| (r.method.to_string(), r.url.path().to_string()))
        .collect()
}

#[test]
fn test_resource_type_name() {
    assert_eq!(DkronJobResource::new().type_name(), "dkron_job");
    assert_eq!(DkronJobResource::default().type_name(), "dkron_job");
}

#[tokio::test]
async fn test_create_sets_id_to_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let resource = DkronJobResource::new();
    let mut data = ResourceData::new(full_config());
    resource.create(&context(&server), &mut data).await.unwrap();
    assert_eq!(data.id(), Some("backup"));
}

#[tokio::test]
async fn test_create_body_reshapes_processors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let resource = DkronJobResource::new();
    let mut data = ResourceData::new(full_config());
    resource.create(&context(&server), &mut data).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(
        body["processors"],
        json!({
            "files": {"forward": "true", "log_dir": "/var/log/dkron"},
            "log": {}
        })
    );
    assert!(body.get("parent_job").is_none());
    assert!(body.get("disabled").is_none());
    assert_eq!(body["retries"], json!(2));
}

#[tokio::test]
async fn test_create_failure_surfaces_body_and_keeps_no_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .respond_with(ResponseTemplate::new(400).set_body_string("parent job does not exist"))
        .mount(&server)
        .await;

    let resource = DkronJobResource::new();
    let mut data = ResourceData::new(full_config());
    let err = resource.create(&context(&server), &mut data).await.unwrap_err();
    assert_eq!(err.to_string(), "parent job does not exist");
    assert!(data.id().is_none());
}

#[tokio::test]
async fn test_create_invalid_attribute_makes_no_call() {
    let server = MockServer::start().await;
    let resource = DkronJobResource::new();
    let mut config = full_config();
    config.insert("tags".into(), json!({"role": 1}));
    let mut data = ResourceData::new(config);

    let err = resource.create(&context(&server), &mut data).await.unwrap_err();
    assert_eq!(err.attribute(), Some("tags.role"));
    assert!(requests(&server).await.is_empty());
}

#[tokio::test]
async fn test_read_restores_processors_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/jobs/backup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "backup",
            "schedule": "@every 1h",
            "executor": "shell",
            "processors": {"log": {}, "files": {"log_dir": "/tmp"}},
            "success_count": 12
        })))
        .mount(&server)
        .await;

    let resource = DkronJobResource::new();
    let mut data = ResourceData::from_id("backup");
    resource.read(&context(&server), &mut data).await.unwrap();

    assert_eq!(data.get_string("schedule").unwrap(), "@every 1h");
    assert_eq!(data.get_string("owner").unwrap(), "");
    assert_eq!(
        data.get_list("processors").unwrap(),
        vec![
            json!({"type": "files", "forward": "", "log_dir": "/tmp"}),
            json!({"type": "log", "forward": "", "log_dir": ""}),
        ]
    );
    assert!(data.get("success_count").is_none());
}

#[tokio::test]
async fn test_read_failure_leaves_data_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/jobs/backup"))
        .respond_with(ResponseTemplate::new(500).set_body_string("no leader"))
        .mount(&server)
        .await;

    let resource = DkronJobResource::new();
    let state = ResourceState::new("dkron_job", "backup").with_attributes(full_config());
    let mut data = ResourceData::from_state(&state);
    let err = resource.read(&context(&server), &mut data).await.unwrap_err();

    assert_eq!(err.to_string(), "no leader");
    assert_eq!(data.attributes(), &full_config());
    assert_eq!(data.id(), Some("backup"));
}

#[tokio::test]
async fn test_read_without_id() {
    let server = MockServer::start().await;
    let resource = DkronJobResource::new();
    let mut data = ResourceData::default();
    let err = resource.read(&context(&server), &mut data).await.unwrap_err();
    assert!(matches!(err, ResourceError::MissingId));
}

#[tokio::test]
async fn test_create_then_read_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let resource = DkronJobResource::new();
    let ctx = context(&server);
    let mut created = ResourceData::new(full_config());
    resource.create(&ctx, &mut created).await.unwrap();

    // Serve back exactly what was written.
    let received = server.received_requests().await.unwrap();
    let stored: Value = serde_json::from_slice(&received[0].body).unwrap();
    Mock::given(method("GET"))
        .and(path("/v1/jobs/backup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored))
        .mount(&server)
        .await;

    let mut read = ResourceData::from_id(created.id().unwrap());
    resource.read(&ctx, &mut read).await.unwrap();

    for key in ["tags", "executor_config", "metadata", "processors"] {
        assert_eq!(read.get(key), full_config().get(key), "{}", key);
    }
    assert_eq!(read.attributes(), &full_config());
}

#[tokio::test]
async fn test_update_without_rename_overwrites() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let resource = DkronJobResource::new();
    let state = ResourceState::new("dkron_job", "backup").with_attributes(full_config());
    let mut config = full_config();
    config.insert("schedule".into(), json!("@every 2h"));
    let mut data = ResourceData::from_state(&state).with_config(config);

    resource.update(&context(&server), &mut data).await.unwrap();
    assert_eq!(requests(&server).await, vec![("POST".to_string(), "/v1/jobs".to_string())]);
    assert_eq!(data.id(), Some("backup"));
}

#[tokio::test]
async fn test_rename_deletes_old_before_create() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/jobs/backup"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let resource = DkronJobResource::new();
    let state = ResourceState::new("dkron_job", "backup").with_attributes(full_config());
    let mut config = full_config();
    config.insert("name".into(), json!("backup-v2"));
    let mut data = ResourceData::from_state(&state).with_config(config);

    resource.update(&context(&server), &mut data).await.unwrap();
    assert_eq!(
        requests(&server).await,
        vec![
            ("DELETE".to_string(), "/v1/jobs/backup".to_string()),
            ("POST".to_string(), "/v1/jobs".to_string()),
        ]
    );
    assert_eq!(data.id(), Some("backup-v2"));
}

#[tokio::test]
async fn test_rename_stops_when_delete_fails() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/jobs/backup"))
        .respond_with(ResponseTemplate::new(500).set_body_string("locked"))
        .mount(&server)
        .await;

    let resource = DkronJobResource::new();
    let state = ResourceState::new("dkron_job", "backup").with_attributes(full_config());
    let mut config = full_config();
    config.insert("name".into(), json!("backup-v2"));
    let mut data = ResourceData::from_state(&state).with_config(config);

    let err = resource.update(&context(&server), &mut data).await.unwrap_err();
    assert_eq!(err.to_string(), "locked");
    assert_eq!(requests(&server).await.len(), 1);
    assert_eq!(data.id(), Some("backup"));
}

fn renamed(state: &ResourceState, name: &str) -> ResourceData {
    let mut config = full_config();
    config.insert("name".into(), json!(name));
    ResourceData::from_state(state).with_config(config)
}

#[tokio::test]
async fn test_rename_with_invalid_attribute_makes_no_call() {
    let server = MockServer::start().await;
    let resource = DkronJobResource::new();
    let state = ResourceState::new("dkron_job", "backup").with_attributes(full_config());
    let mut data = renamed(&state, "backup-v2");
    data.set("tags", json!({"role": 1})).unwrap();

    let err = resource.update(&context(&server), &mut data).await.unwrap_err();
    assert_eq!(err.attribute(), Some("tags.role"));
    assert!(requests(&server).await.is_empty());
    assert_eq!(data.id(), Some("backup"));
}

#[tokio::test]
async fn test_rename_create_failure_after_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/jobs/backup"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let resource = DkronJobResource::new();
    let state = ResourceState::new("dkron_job", "backup").with_attributes(full_config());
    let mut data = renamed(&state, "backup-v2");

    let err = resource.update(&context(&server), &mut data).await.unwrap_err();
    assert_eq!(err.to_string(), "boom");
    assert_eq!(
        requests(&server).await,
        vec![
            ("DELETE".to_string(), "/v1/jobs/backup".to_string()),
            ("POST".to_string(), "/v1/jobs".to_string()),
        ]
    );
    assert_eq!(data.id(), Some("backup"));
}

#[tokio::test]
async fn test_rename_when_old_job_already_gone() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/jobs/backup"))
        .respond_with(ResponseTemplate::new(404).set_body_string("job not found"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let resource = DkronJobResource::new();
    let state = ResourceState::new("dkron_job", "backup").with_attributes(full_config());
    let mut data = renamed(&state, "backup-v2");

    resource.update(&context(&server), &mut data).await.unwrap();
    assert_eq!(data.id(), Some("backup-v2"));
}

#[tokio::test]
async fn test_delete_clears_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/jobs/backup"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let resource = DkronJobResource::new();
    let mut data = ResourceData::from_id("backup");
    resource.delete(&context(&server), &mut data).await.unwrap();
    assert!(data.id().is_none());
}

#[tokio::test]
async fn test_delete_failure_keeps_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/jobs/backup"))
        .respond_with(ResponseTemplate::new(404).set_body_string("job not found"))
        .mount(&server)
        .await;

    let resource = DkronJobResource::new();
    let mut data = ResourceData::from_id("backup");
    let err = resource.delete(&context(&server), &mut data).await.unwrap_err();
    assert_eq!(err.to_string(), "job not found");
    assert_eq!(data.id(), Some("backup"));
}

#[tokio::test]
async fn test_import_reads_existing_job() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/jobs/legacy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "legacy",
            "schedule": "@daily",
            "executor": "http",
            "executor_config": {"url": "http://svc/run"}
        })))
        .mount(&server)
        .await;

    let resource = DkronJobResource::new();
    let mut data = ResourceData::default();
    resource
        .import(&context(&server), "legacy", &mut data)
        .await
        .unwrap();
    assert_eq!(data.id(), Some("legacy"));
    assert_eq!(data.get_string_map("executor_config").unwrap()["url"], "http://svc/run");
}
