//! Ticket storage trait and errors.

use thiserror::Error;
use uuid::Uuid;

use super::{Ticket, TicketUpsert};
use crate::db::DatabaseError;
use crate::error::ErrorKind;

/// Error type for ticket operations.
#[derive(Debug, Error)]
pub enum TicketError {
    #[error("Ticket not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid ticket status: {0}")]
    InvalidStatus(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl TicketError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TicketError::NotFound(_) => ErrorKind::NotFound,
            TicketError::Validation(_) | TicketError::InvalidStatus(_) => ErrorKind::Validation,
            TicketError::BadRequest(_) => ErrorKind::BadRequest,
            TicketError::Database(_) => ErrorKind::Internal,
        }
    }
}

impl From<DatabaseError> for TicketError {
    fn from(e: DatabaseError) -> Self {
        TicketError::Database(e.to_string())
    }
}

impl From<rusqlite::Error> for TicketError {
    fn from(e: rusqlite::Error) -> Self {
        TicketError::Database(e.to_string())
    }
}

/// Trait for ticket storage backends.
pub trait TicketStore: Send + Sync {
    /// Get a ticket by UUID.
    fn get(&self, uuid: &Uuid) -> Result<Option<Ticket>, TicketError>;

    /// Create the ticket, or edit it if the UUID already exists.
    fn create_or_edit(&self, upsert: TicketUpsert) -> Result<Ticket, TicketError>;

    /// Replace the description and bump `updated_at`.
    fn update_description(&self, uuid: &Uuid, description: &str) -> Result<Ticket, TicketError>;

    /// Permanently delete a ticket. Returns the deleted ticket.
    fn delete(&self, uuid: &Uuid) -> Result<Ticket, TicketError>;

    /// Tickets of one phase, ordered by sequence then creation time.
    fn list_by_phase(
        &self,
        feature_uuid: &Uuid,
        phase_uuid: &Uuid,
    ) -> Result<Vec<Ticket>, TicketError>;
}
