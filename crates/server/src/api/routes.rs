use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use bountydesk_core::REVIEW_CALLBACK_PATH;

use super::middleware::{auth_middleware, metrics_middleware};
use super::{bounties, handlers, review, tickets};
use crate::state::AppState;

/// Prefix every route below is mounted on.
pub const API_PREFIX: &str = "/api/v1";

pub fn create_router(state: Arc<AppState>) -> Router {
    // The builder reports back on the callback path without credentials.
    let callback_path = REVIEW_CALLBACK_PATH
        .strip_prefix(API_PREFIX)
        .unwrap_or(REVIEW_CALLBACK_PATH);

    let public_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        .route("/bounties/filter/count", get(bounties::status_counts))
        .route("/bounties/ticket/{uuid}", get(tickets::get_ticket))
        .route(callback_path, post(review::receive_review))
        .route(&format!("{}/", callback_path), post(review::receive_review));

    let protected_routes = Router::new()
        .route(
            "/bounties/ticket/{uuid}",
            post(tickets::upsert_ticket).delete(tickets::delete_ticket),
        )
        .route("/bounties/ticket/review/send", post(review::send_for_review))
        .route(
            "/features/{feature_uuid}/phase/{phase_uuid}/tickets",
            get(tickets::list_phase_tickets),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state);

    Router::new()
        .nest(API_PREFIX, api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
