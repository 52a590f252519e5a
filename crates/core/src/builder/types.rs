//! Wire types for the builder service.

use serde::{Deserialize, Serialize};

/// Path on this server that the builder service posts reviews back to.
pub const REVIEW_CALLBACK_PATH: &str = "/api/v1/bounties/ticket/review";

/// Ticket fields sent for dispatch. Identifiers are raw strings here and
/// validated by the dispatcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DispatchTicket {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub feature_uuid: String,
    #[serde(default)]
    pub phase_uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Job submitted to the builder service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobRequest {
    pub name: String,
    pub workflow_id: u64,
    pub workflow_params: WorkflowParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowParams {
    pub set_var: SetVar,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetVar {
    pub attributes: JobAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobAttributes {
    pub vars: JobVars,
}

/// Variables handed to the workflow. Key names are fixed by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JobVars {
    #[serde(rename = "featureUUID")]
    pub feature_uuid: String,
    #[serde(rename = "phaseUUID")]
    pub phase_uuid: String,
    #[serde(rename = "ticketUUID")]
    pub ticket_uuid: String,
    #[serde(rename = "ticketName")]
    pub ticket_name: String,
    #[serde(rename = "ticketDescription")]
    pub ticket_description: String,
    #[serde(rename = "productBrief")]
    pub product_brief: String,
    #[serde(rename = "featureBrief")]
    pub feature_brief: String,
    pub examples: String,
    pub webhook_url: String,
}

impl JobRequest {
    pub fn new(name: impl Into<String>, workflow_id: u64, vars: JobVars) -> Self {
        Self {
            name: name.into(),
            workflow_id,
            workflow_params: WorkflowParams {
                set_var: SetVar {
                    attributes: JobAttributes { vars },
                },
            },
        }
    }

    pub fn vars(&self) -> &JobVars {
        &self.workflow_params.set_var.attributes.vars
    }
}

/// Raw answer from the builder service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderReply {
    pub status: u16,
    pub body: String,
}

impl BuilderReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Where a dispatch got to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DispatchState {
    Created,
    Dispatched,
    AwaitingReview,
    DispatchFailed,
}

impl DispatchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchState::Created => "created",
            DispatchState::Dispatched => "dispatched",
            DispatchState::AwaitingReview => "awaiting_review",
            DispatchState::DispatchFailed => "dispatch_failed",
        }
    }
}

/// Successful hand-off to the builder service.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DispatchReceipt {
    /// Correlation id; the ticket UUID.
    pub ticket_id: String,
    pub state: DispatchState,
    /// Body returned by the builder service, verbatim.
    pub acknowledgment: String,
}
