//! Mock builder service client for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::builder::{BuilderClient, BuilderReply, DispatchError, JobRequest};

/// Mock implementation of the BuilderClient trait.
///
/// Records every submitted job with the API key it was sent with, answers
/// with a scripted reply (200 with a small JSON body by default) and can be
/// told to fail the next call.
///
/// # Example
///
/// ```rust,ignore
/// use bountydesk_core::testing::MockBuilderClient;
///
/// let client = MockBuilderClient::new();
/// client.set_reply(BuilderReply { status: 500, body: "down".into() }).await;
///
/// // Dispatch through a WorkflowDispatcher...
/// assert_eq!(client.submitted().await.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockBuilderClient {
    submitted: Arc<RwLock<Vec<(String, JobRequest)>>>,
    reply: Arc<RwLock<BuilderReply>>,
    next_error: Arc<RwLock<Option<DispatchError>>>,
}

impl Default for MockBuilderClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBuilderClient {
    pub fn new() -> Self {
        Self {
            submitted: Arc::new(RwLock::new(Vec::new())),
            reply: Arc::new(RwLock::new(BuilderReply::ok(
                r#"{"success":true,"data":{"project_id":1}}"#,
            ))),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Reply returned by every successful call from now on.
    pub async fn set_reply(&self, reply: BuilderReply) {
        *self.reply.write().await = reply;
    }

    /// Make the next call fail with `error`. Later calls succeed again.
    pub async fn fail_next(&self, error: DispatchError) {
        *self.next_error.write().await = Some(error);
    }

    /// `(api_key, job)` pairs in submission order.
    pub async fn submitted(&self) -> Vec<(String, JobRequest)> {
        self.submitted.read().await.clone()
    }

    pub async fn clear(&self) {
        self.submitted.write().await.clear();
    }
}

#[async_trait]
impl BuilderClient for MockBuilderClient {
    async fn submit(&self, api_key: &str, job: &JobRequest) -> Result<BuilderReply, DispatchError> {
        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        self.submitted
            .write()
            .await
            .push((api_key.to_string(), job.clone()));
        Ok(self.reply.read().await.clone())
    }
}
