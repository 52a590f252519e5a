//! HTTP client for the builder service.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::{BuilderReply, DispatchError, JobRequest};

/// Transport to the builder service.
///
/// Implementations return whatever status the service answered with;
/// deciding what counts as success is up to the caller.
#[async_trait]
pub trait BuilderClient: Send + Sync {
    async fn submit(&self, api_key: &str, job: &JobRequest) -> Result<BuilderReply, DispatchError>;
}

/// reqwest-backed [`BuilderClient`].
pub struct HttpBuilderClient {
    client: Client,
    api_url: String,
    timeout: Duration,
}

impl HttpBuilderClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            timeout,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl BuilderClient for HttpBuilderClient {
    async fn submit(&self, api_key: &str, job: &JobRequest) -> Result<BuilderReply, DispatchError> {
        debug!(url = %self.api_url, "Posting job to builder service");

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Token token={}", api_key))
            .json(job)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DispatchError::Timeout(self.timeout)
                } else {
                    DispatchError::Transport(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                DispatchError::Timeout(self.timeout)
            } else {
                DispatchError::Transport(format!("Error reading response: {}", e))
            }
        })?;

        Ok(BuilderReply { status, body })
    }
}
