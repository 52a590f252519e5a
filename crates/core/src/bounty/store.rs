//! Bounty storage trait and errors.

use thiserror::Error;

use super::{Bounty, NewBounty, StatusCounts};
use crate::db::DatabaseError;
use crate::error::ErrorKind;

/// Error type for bounty operations.
#[derive(Debug, Error)]
pub enum BountyError {
    #[error("Bounty not found: {0}")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(String),
}

impl BountyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BountyError::NotFound(_) => ErrorKind::NotFound,
            BountyError::Database(_) => ErrorKind::Internal,
        }
    }
}

impl From<DatabaseError> for BountyError {
    fn from(e: DatabaseError) -> Self {
        BountyError::Database(e.to_string())
    }
}

impl From<rusqlite::Error> for BountyError {
    fn from(e: rusqlite::Error) -> Self {
        BountyError::Database(e.to_string())
    }
}

/// Trait for bounty storage backends.
pub trait BountyStore: Send + Sync {
    /// Insert a bounty. Used for seeding; creation proper is external.
    fn insert(&self, bounty: NewBounty) -> Result<Bounty, BountyError>;

    /// Get a bounty by id.
    fn get(&self, id: i64) -> Result<Option<Bounty>, BountyError>;

    /// List every bounty, hidden ones included.
    fn list(&self) -> Result<Vec<Bounty>, BountyError>;

    /// Count visible bounties per status bucket in a single aggregate query.
    fn status_counts(&self) -> Result<StatusCounts, BountyError>;

    /// Add one to the proof-of-work counter and stamp `updated`.
    ///
    /// Fails with [`BountyError::NotFound`] when no bounty has this id; no
    /// row is ever created.
    fn increment_proof_count(&self, id: i64) -> Result<(), BountyError>;

    /// Remove every bounty. Returns the number of rows deleted.
    fn delete_all(&self) -> Result<usize, BountyError>;
}
