//! Dkron REST client.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

use tfdkron_config::ProviderConfig;
use tfdkron_protocols::api::{Job, JobsApi};
use tfdkron_protocols::error::ApiError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = concat!("tfdkron/", env!("CARGO_PKG_VERSION"));

/// Client for the Dkron job endpoints.
pub struct DkronClient {
    base_url: Url,
    client: Client,
}

impl DkronClient {
    /// Create a client for the given server URL, e.g. `http://localhost:8080`.
    pub fn new(host: &str) -> Result<Self, ApiError> {
        Self::with_options(host, Duration::from_secs(DEFAULT_TIMEOUT_SECS), DEFAULT_USER_AGENT)
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ApiError> {
        Self::with_options(
            &config.host,
            Duration::from_secs(config.timeout_seconds),
            &config.user_agent,
        )
    }

    pub fn with_options(host: &str, timeout: Duration, user_agent: &str) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(host).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", host, e)))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: expected an http or https URL",
                host
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/v1/jobs[/{name}]`, with the name percent-encoded as one segment.
    fn jobs_url(&self, name: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().extend(["v1", "jobs"]);
            if let Some(name) = name {
                segments.push(name);
            }
        }
        url.set_query(None);
        Ok(url)
    }

    /// Send a request once and return the body of a 2xx response.
    ///
    /// Gives up with [`ApiError::Cancelled`] as soon as `cancel` fires.
    async fn call(
        &self,
        method: Method,
        url: Url,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<String, ApiError> {
        tracing::debug!(method = %method, url = %url, "Calling Dkron API");
        let request = build(self.client.request(method.clone(), url.clone()));

        let exchange = async move {
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Network(format!("Failed to read body: {}", e)))?;

            if !status.is_success() {
                return Err(ApiError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                });
            }
            Ok(body)
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApiError::Cancelled),
            result = exchange => result,
        };

        if let Err(e) = &result {
            tracing::warn!(method = %method, url = %url, status = ?e.status(), error = %e, "Dkron API call failed");
        }
        result
    }
}

#[async_trait]
impl JobsApi for DkronClient {
    async fn upsert_job(&self, job: &Job, cancel: &CancellationToken) -> Result<(), ApiError> {
        let url = self.jobs_url(None)?;
        self.call(Method::POST, url, |r| r.json(job), cancel).await?;
        tracing::info!(job = %job.name, "Upserted job");
        Ok(())
    }

    async fn show_job(&self, name: &str, cancel: &CancellationToken) -> Result<Job, ApiError> {
        let url = self.jobs_url(Some(name))?;
        let body = self.call(Method::GET, url, |r| r, cancel).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn delete_job(&self, name: &str, cancel: &CancellationToken) -> Result<(), ApiError> {
        let url = self.jobs_url(Some(name))?;
        self.call(Method::DELETE, url, |r| r, cancel).await?;
        tracing::info!(job = %name, "Deleted job");
        Ok(())
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
