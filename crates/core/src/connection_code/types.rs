//! Connection code records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A code to be issued. `date_created` defaults to the insert time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewConnectionCode {
    /// Caller-supplied id. Not unique.
    pub id: i64,
    pub connection_string: String,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
}

impl NewConnectionCode {
    pub fn new(id: i64, connection_string: impl Into<String>) -> Self {
        Self {
            id,
            connection_string: connection_string.into(),
            date_created: None,
        }
    }

    pub fn with_date_created(mut self, date_created: DateTime<Utc>) -> Self {
        self.date_created = Some(date_created);
        self
    }
}

/// A persisted connection code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionCode {
    pub id: i64,
    pub connection_string: String,
    pub date_created: DateTime<Utc>,
    /// Set once on dispense, never reset.
    pub is_used: bool,
}

/// What a dispense hands back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionCodeShort {
    pub connection_string: String,
    pub date_created: DateTime<Utc>,
}

/// Which unused code a dispense picks.
///
/// Ties on `date_created` always go to the code inserted first.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DispenseOrder {
    /// Oldest `date_created` first (FIFO issuance).
    #[default]
    OldestFirst,
    /// Most recent `date_created` first.
    NewestFirst,
}

impl DispenseOrder {
    pub(crate) fn sql_direction(&self) -> &'static str {
        match self {
            DispenseOrder::OldestFirst => "ASC",
            DispenseOrder::NewestFirst => "DESC",
        }
    }
}
