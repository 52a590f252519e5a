use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::{ReviewError, ReviewRequest};
use crate::metrics::REVIEWS_INGESTED;
use crate::ticket::{Ticket, TicketStore};

/// Applies reviewed descriptions to stored tickets.
///
/// Replaying a review writes the same description again and only moves
/// `updated_at`. Concurrent edits of the same ticket resolve last write wins.
pub struct ReviewIngestor {
    tickets: Arc<dyn TicketStore>,
}

impl ReviewIngestor {
    pub fn new(tickets: Arc<dyn TicketStore>) -> Self {
        Self { tickets }
    }

    /// Parse a raw callback body and apply it.
    pub fn ingest(&self, body: &[u8]) -> Result<Ticket, ReviewError> {
        let request: ReviewRequest = serde_json::from_slice(body).map_err(|e| {
            REVIEWS_INGESTED.with_label_values(&["invalid"]).inc();
            warn!("Unparseable review callback: {}", e);
            ReviewError::Validation("Error parsing request body".to_string())
        })?;

        self.apply(request)
    }

    /// Apply an already parsed review.
    pub fn apply(&self, request: ReviewRequest) -> Result<Ticket, ReviewError> {
        let result = self.apply_inner(&request);

        let label = match &result {
            Ok(_) => "applied",
            Err(ReviewError::Validation(_)) => "invalid",
            Err(ReviewError::NotFound(_)) => "not_found",
            Err(ReviewError::Database(_)) => "error",
        };
        REVIEWS_INGESTED.with_label_values(&[label]).inc();

        match &result {
            Ok(ticket) => info!("Applied review to ticket {}", ticket.uuid),
            Err(e) => warn!(ticket = %request.ticket_uuid, "Review rejected: {}", e),
        }
        result
    }

    fn apply_inner(&self, request: &ReviewRequest) -> Result<Ticket, ReviewError> {
        request.validate()?;

        let uuid = Uuid::parse_str(request.ticket_uuid.trim())
            .map_err(|_| ReviewError::Validation("Invalid ticket UUID format".to_string()))?;

        // Lookup first so a missing ticket is reported before any write
        if self.tickets.get(&uuid)?.is_none() {
            return Err(ReviewError::NotFound(uuid.to_string()));
        }

        Ok(self
            .tickets
            .update_description(&uuid, &request.ticket_description)?)
    }
}
