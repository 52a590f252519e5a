//! Bounty report handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use bountydesk_core::StatusCounts;

use super::error::ApiError;
use crate::state::AppState;

/// Visible bounty counts per status bucket.
pub async fn status_counts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusCounts>, ApiError> {
    let counts = state.bounty_store().status_counts()?;
    Ok(Json(counts))
}
