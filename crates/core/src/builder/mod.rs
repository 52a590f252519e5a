//! Hand-off of tickets to the external builder service.
//!
//! The dispatcher assembles a [`JobRequest`] from a ticket plus the product
//! and feature briefs, and posts it through a [`BuilderClient`]. The service
//! later reports back on [`REVIEW_CALLBACK_PATH`].

mod client;
mod dispatcher;
mod types;

pub use client::{BuilderClient, HttpBuilderClient};
pub use dispatcher::WorkflowDispatcher;
pub use types::{
    BuilderReply, DispatchReceipt, DispatchState, DispatchTicket, JobAttributes, JobRequest,
    JobVars, SetVar, WorkflowParams, REVIEW_CALLBACK_PATH,
};

use std::time::Duration;
use thiserror::Error;

use crate::error::ErrorKind;

/// Errors from dispatching a ticket.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The ticket failed validation. Nothing was sent.
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Feature not found with the provided UUID: {0}")]
    FeatureNotFound(String),

    #[error("Error retrieving {what}: {reason}")]
    BriefUnavailable { what: &'static str, reason: String },

    #[error("Builder not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Error encoding payload: {0}")]
    Encode(String),

    #[error("Error sending request to builder: {0}")]
    Transport(String),

    #[error("Builder did not respond within {0:?}")]
    Timeout(Duration),

    /// The service answered with a non-success status.
    #[error("Builder rejected the job with status {status}")]
    Rejected { status: u16, body: String },
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::Validation(_) => ErrorKind::Validation,
            DispatchError::FeatureNotFound(_) => ErrorKind::NotFound,
            DispatchError::BriefUnavailable { .. }
            | DispatchError::NotConfigured(_)
            | DispatchError::Encode(_) => ErrorKind::Internal,
            DispatchError::Transport(_) | DispatchError::Rejected { .. } => {
                ErrorKind::ExternalService
            }
            DispatchError::Timeout(_) => ErrorKind::Timeout,
        }
    }

    /// Short label used for the dispatch metrics.
    pub fn metric_label(&self) -> &'static str {
        match self {
            DispatchError::Validation(_) => "invalid",
            DispatchError::FeatureNotFound(_) | DispatchError::BriefUnavailable { .. } => {
                "brief_error"
            }
            DispatchError::NotConfigured(_) => "not_configured",
            DispatchError::Encode(_) => "encode_error",
            DispatchError::Transport(_) => "transport",
            DispatchError::Timeout(_) => "timeout",
            DispatchError::Rejected { .. } => "rejected",
        }
    }

    /// Detail lines for the dispatch response.
    pub fn details(&self) -> Vec<String> {
        match self {
            DispatchError::Validation(errors) => errors.clone(),
            DispatchError::FeatureNotFound(_) => {
                vec!["Feature not found with the provided UUID".to_string()]
            }
            DispatchError::BriefUnavailable { reason, .. } => vec![reason.clone()],
            DispatchError::Rejected { body, .. } => vec![body.clone()],
            DispatchError::Transport(reason) | DispatchError::Encode(reason) => {
                vec![reason.clone()]
            }
            DispatchError::NotConfigured(_) | DispatchError::Timeout(_) => Vec::new(),
        }
    }
}
