//! Ingestion of reviewed ticket descriptions posted back by the builder
//! service.

mod ingestor;

pub use ingestor::ReviewIngestor;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ErrorKind;
use crate::ticket::TicketError;

/// Callback body sent by the builder service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReviewRequest {
    #[serde(default)]
    pub ticket_uuid: String,
    #[serde(default)]
    pub ticket_description: String,
}

impl ReviewRequest {
    pub fn validate(&self) -> Result<(), ReviewError> {
        if self.ticket_uuid.trim().is_empty() {
            return Err(ReviewError::Validation("ticket UUID is required".to_string()));
        }
        if self.ticket_description.trim().is_empty() {
            return Err(ReviewError::Validation(
                "ticket description is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("{0}")]
    Validation(String),

    #[error("Ticket not found: {0}")]
    NotFound(String),

    #[error("Failed to update ticket: {0}")]
    Database(String),
}

impl ReviewError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReviewError::Validation(_) => ErrorKind::Validation,
            ReviewError::NotFound(_) => ErrorKind::NotFound,
            ReviewError::Database(_) => ErrorKind::Internal,
        }
    }
}

impl From<TicketError> for ReviewError {
    fn from(e: TicketError) -> Self {
        match e {
            TicketError::NotFound(uuid) => ReviewError::NotFound(uuid),
            TicketError::Validation(msg)
            | TicketError::InvalidStatus(msg)
            | TicketError::BadRequest(msg) => ReviewError::Validation(msg),
            TicketError::Database(msg) => ReviewError::Database(msg),
        }
    }
}
