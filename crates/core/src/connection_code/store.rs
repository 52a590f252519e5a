//! Connection code storage trait and errors.

use thiserror::Error;

use super::{ConnectionCode, ConnectionCodeShort, NewConnectionCode};
use crate::db::DatabaseError;
use crate::error::ErrorKind;

#[derive(Debug, Error)]
pub enum ConnectionCodeError {
    #[error("No connection codes to issue")]
    EmptyInput,

    #[error("Database error: {0}")]
    Database(String),
}

impl ConnectionCodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConnectionCodeError::EmptyInput => ErrorKind::EmptyInput,
            ConnectionCodeError::Database(_) => ErrorKind::Internal,
        }
    }
}

impl From<DatabaseError> for ConnectionCodeError {
    fn from(e: DatabaseError) -> Self {
        ConnectionCodeError::Database(e.to_string())
    }
}

impl From<rusqlite::Error> for ConnectionCodeError {
    fn from(e: rusqlite::Error) -> Self {
        ConnectionCodeError::Database(e.to_string())
    }
}

/// Single-use credential dispenser.
pub trait ConnectionCodeStore: Send + Sync {
    /// Insert a batch of codes in one transaction and return what was stored.
    ///
    /// An empty batch fails with [`ConnectionCodeError::EmptyInput`].
    fn issue_batch(
        &self,
        codes: Vec<NewConnectionCode>,
    ) -> Result<Vec<ConnectionCode>, ConnectionCodeError>;

    /// Hand out one unused code and mark it used.
    ///
    /// Returns `Ok(None)` when every code has been used. A code is never
    /// returned to more than one caller.
    fn dispense_one(&self) -> Result<Option<ConnectionCodeShort>, ConnectionCodeError>;

    /// Number of codes still available.
    fn count_unused(&self) -> Result<i64, ConnectionCodeError>;
}
