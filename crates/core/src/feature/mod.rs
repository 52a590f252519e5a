//! Features, phases and workspaces, as seen by the ticket workflow.
//!
//! These are owned elsewhere; this crate only reads them to build the
//! product and feature briefs sent along with a dispatched ticket.

mod directory;
mod sqlite_store;
mod types;

pub use directory::{FeatureDirectory, FeatureError};
pub use sqlite_store::SqliteFeatureDirectory;
pub use types::{Feature, FeaturePhase, Workspace};
