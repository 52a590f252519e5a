//! Builder hand-off and the review callback it reports back on.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use bountydesk_core::{DispatchState, DispatchTicket, ErrorKind, Ticket};

use super::error::{status_for, ApiError};
use super::middleware::AuthUser;
use crate::state::AppState;

/// Outcome of a dispatch, successful or not.
#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
    pub state: DispatchState,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Send a ticket to the builder service for review.
pub async fn send_for_review(
    State(state): State<Arc<AppState>>,
    AuthUser(pubkey): AuthUser,
    payload: Result<Json<DispatchTicket>, JsonRejection>,
) -> Result<Json<DispatchResponse>, (StatusCode, Json<DispatchResponse>)> {
    let Json(ticket) = payload.map_err(|rejection| {
        failure(
            None,
            ErrorKind::Validation,
            "Invalid request body".to_string(),
            vec![rejection.body_text()],
        )
    })?;

    let ticket_id = Some(ticket.uuid.clone()).filter(|id| !id.is_empty());
    info!(ticket = ?ticket_id, %pubkey, "Review requested");

    match state.dispatcher().dispatch(ticket).await {
        Ok(receipt) => Ok(Json(DispatchResponse {
            success: true,
            ticket_id: Some(receipt.ticket_id),
            state: receipt.state,
            message: "Ticket sent to builder for review".to_string(),
            kind: None,
            errors: Vec::new(),
        })),
        Err(e) => Err(failure(ticket_id, e.kind(), e.to_string(), e.details())),
    }
}

fn failure(
    ticket_id: Option<String>,
    kind: ErrorKind,
    message: String,
    errors: Vec<String>,
) -> (StatusCode, Json<DispatchResponse>) {
    (
        status_for(kind),
        Json(DispatchResponse {
            success: false,
            ticket_id,
            state: DispatchState::DispatchFailed,
            message,
            kind: Some(kind),
            errors,
        }),
    )
}

/// Webhook the builder calls with its reviewed description.
///
/// The body is read raw so malformed JSON gets the same answer as missing
/// fields.
pub async fn receive_review(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Ticket>, ApiError> {
    let ticket = state.reviews().ingest(&body)?;
    Ok(Json(ticket))
}
