pub mod bounties;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod review;
pub mod routes;
pub mod tickets;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
