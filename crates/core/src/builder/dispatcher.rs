//! Ticket dispatch workflow.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    BuilderClient, DispatchError, DispatchReceipt, DispatchState, DispatchTicket, JobRequest,
    JobVars, REVIEW_CALLBACK_PATH,
};
use crate::config::BuilderConfig;
use crate::feature::FeatureDirectory;
use crate::metrics::{DISPATCH_ATTEMPTS, DISPATCH_DURATION};

/// Sends tickets to the builder service.
///
/// A dispatch moves `Created -> Dispatched -> AwaitingReview` or ends in
/// `DispatchFailed`. The ticket's own record is never touched; the result
/// arrives later through review ingestion.
pub struct WorkflowDispatcher {
    client: Arc<dyn BuilderClient>,
    features: Arc<dyn FeatureDirectory>,
    config: BuilderConfig,
}

impl WorkflowDispatcher {
    pub fn new(
        client: Arc<dyn BuilderClient>,
        features: Arc<dyn FeatureDirectory>,
        config: BuilderConfig,
    ) -> Self {
        Self {
            client,
            features,
            config,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Dispatch one ticket and wait for the service to acknowledge it.
    pub async fn dispatch(&self, ticket: DispatchTicket) -> Result<DispatchReceipt, DispatchError> {
        debug!(ticket = %ticket.uuid, state = DispatchState::Created.as_str(), "Dispatch requested");

        match self.run(ticket).await {
            Ok(receipt) => {
                DISPATCH_ATTEMPTS
                    .with_label_values(&[receipt.state.as_str()])
                    .inc();
                info!(
                    ticket = %receipt.ticket_id,
                    state = receipt.state.as_str(),
                    "Ticket handed to builder service"
                );
                Ok(receipt)
            }
            Err(e) => {
                DISPATCH_ATTEMPTS
                    .with_label_values(&[e.metric_label()])
                    .inc();
                warn!(
                    state = DispatchState::DispatchFailed.as_str(),
                    error = %e,
                    "Ticket dispatch failed"
                );
                Err(e)
            }
        }
    }

    async fn run(&self, ticket: DispatchTicket) -> Result<DispatchReceipt, DispatchError> {
        let ticket_uuid = validate_ticket_uuid(&ticket.uuid)?;
        let (product_brief, feature_brief) = self.load_briefs(&ticket.feature_uuid)?;

        let callback_host = self
            .config
            .callback_host
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or(DispatchError::NotConfigured("builder.callback_host"))?;
        let webhook_url = format!(
            "{}{}",
            callback_host.trim_end_matches('/'),
            REVIEW_CALLBACK_PATH
        );

        let job = JobRequest::new(
            self.config.workflow_name.clone(),
            self.config.workflow_id,
            JobVars {
                feature_uuid: ticket.feature_uuid,
                phase_uuid: ticket.phase_uuid,
                ticket_uuid: ticket_uuid.to_string(),
                ticket_name: ticket.name,
                ticket_description: ticket.description,
                product_brief,
                feature_brief,
                examples: String::new(),
                webhook_url,
            },
        );

        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(DispatchError::NotConfigured("builder.api_key"))?;

        debug!(ticket = %ticket_uuid, state = DispatchState::Dispatched.as_str(), "Sending job");
        let started = Instant::now();
        let result = self.client.submit(api_key, &job).await;
        let outcome = match &result {
            Ok(reply) if reply.is_success() => "ok",
            _ => "error",
        };
        DISPATCH_DURATION
            .with_label_values(&[outcome])
            .observe(started.elapsed().as_secs_f64());

        let reply = result?;
        if !reply.is_success() {
            return Err(DispatchError::Rejected {
                status: reply.status,
                body: reply.body,
            });
        }

        Ok(DispatchReceipt {
            ticket_id: ticket_uuid.to_string(),
            state: DispatchState::AwaitingReview,
            acknowledgment: reply.body,
        })
    }

    /// Product and feature briefs, both empty when no feature is referenced.
    fn load_briefs(&self, feature_uuid: &str) -> Result<(String, String), DispatchError> {
        if feature_uuid.is_empty() {
            return Ok((String::new(), String::new()));
        }

        let feature = self
            .features
            .get_feature(feature_uuid)
            .map_err(|e| DispatchError::BriefUnavailable {
                what: "feature details",
                reason: e.to_string(),
            })?
            .ok_or_else(|| DispatchError::FeatureNotFound(feature_uuid.to_string()))?;

        let product_brief = self
            .features
            .product_brief(&feature.workspace_uuid)
            .map_err(|e| DispatchError::BriefUnavailable {
                what: "product brief",
                reason: e.to_string(),
            })?;

        let feature_brief = self
            .features
            .feature_brief(feature_uuid)
            .map_err(|e| DispatchError::BriefUnavailable {
                what: "feature brief",
                reason: e.to_string(),
            })?;

        Ok((product_brief, feature_brief))
    }
}

fn validate_ticket_uuid(raw: &str) -> Result<Uuid, DispatchError> {
    let invalid = |msg: &str| DispatchError::Validation(vec![msg.to_string()]);

    let raw = raw.trim();
    if raw.is_empty() {
        return Err(invalid("UUID is required"));
    }

    match Uuid::parse_str(raw) {
        Ok(uuid) if uuid.is_nil() => Err(invalid("UUID is required")),
        Ok(uuid) => Ok(uuid),
        Err(_) => Err(invalid("Invalid UUID format")),
    }
}
