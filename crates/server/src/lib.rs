//! HTTP surface of bountydesk: routes, middleware, metrics and shared state.

pub mod api;
pub mod metrics;
pub mod state;

pub use api::create_router;
pub use state::AppState;
