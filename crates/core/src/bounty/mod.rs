//! Bounty status reporting and proof-of-work tracking.

mod sqlite_store;
mod store;
mod types;

pub use sqlite_store::SqliteBountyStore;
pub use store::{BountyError, BountyStore};
pub use types::{Bounty, NewBounty, StatusCounts};
