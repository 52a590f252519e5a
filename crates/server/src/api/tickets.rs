//! Ticket API handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

use bountydesk_core::ticket::parse_uuid;
use bountydesk_core::{ErrorKind, Ticket, TicketPayload};

use super::error::ApiError;
use super::middleware::AuthUser;
use crate::state::AppState;

/// Get a ticket by UUID
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<String>,
) -> Result<Json<Ticket>, ApiError> {
    let uuid = parse_uuid("ticket uuid", &uuid)?;

    match state.ticket_store().get(&uuid)? {
        Some(ticket) => Ok(Json(ticket)),
        None => Err(ApiError::new(
            ErrorKind::NotFound,
            format!("Ticket not found: {}", uuid),
        )),
    }
}

/// Create the ticket at `uuid`, or edit it when it already exists.
///
/// The path identifier wins over any `uuid` in the body.
pub async fn upsert_ticket(
    State(state): State<Arc<AppState>>,
    AuthUser(pubkey): AuthUser,
    Path(uuid): Path<String>,
    payload: Result<Json<TicketPayload>, JsonRejection>,
) -> Result<Json<Ticket>, ApiError> {
    let Json(payload) = payload?;
    let upsert = payload.into_upsert(&uuid)?;

    let ticket = state.ticket_store().create_or_edit(upsert)?;
    info!(ticket = %ticket.uuid, %pubkey, "Ticket saved");

    Ok(Json(ticket))
}

/// Delete a ticket and return what was removed
pub async fn delete_ticket(
    State(state): State<Arc<AppState>>,
    AuthUser(pubkey): AuthUser,
    Path(uuid): Path<String>,
) -> Result<Json<Ticket>, ApiError> {
    let uuid = parse_uuid("ticket uuid", &uuid)?;

    let ticket = state.ticket_store().delete(&uuid)?;
    info!(ticket = %ticket.uuid, %pubkey, "Ticket deleted");

    Ok(Json(ticket))
}

/// Tickets of one feature phase, in sequence order.
///
/// Both the feature and the phase must exist, and the phase must belong to
/// the feature.
pub async fn list_phase_tickets(
    State(state): State<Arc<AppState>>,
    AuthUser(_pubkey): AuthUser,
    Path((feature_uuid, phase_uuid)): Path<(String, String)>,
) -> Result<Json<Vec<Ticket>>, ApiError> {
    let feature_uuid = parse_uuid("feature uuid", &feature_uuid)?;
    let phase_uuid = parse_uuid("phase uuid", &phase_uuid)?;

    let feature_id = feature_uuid.to_string();
    if state.features().get_feature(&feature_id)?.is_none() {
        return Err(ApiError::new(
            ErrorKind::NotFound,
            format!("Feature not found: {}", feature_uuid),
        ));
    }

    match state.features().get_phase(&phase_uuid.to_string())? {
        Some(phase) if phase.feature_uuid == feature_id => {}
        _ => {
            return Err(ApiError::new(
                ErrorKind::NotFound,
                format!("Phase not found: {}", phase_uuid),
            ))
        }
    }

    let tickets = state
        .ticket_store()
        .list_by_phase(&feature_uuid, &phase_uuid)?;

    Ok(Json(tickets))
}
