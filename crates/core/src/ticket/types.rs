//! Core ticket data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TicketError;

/// Lifecycle state of a ticket.
///
/// The wire form is the upper-case name (`"IN_PROGRESS"`). Strings are
/// parsed once at the boundary; everything past it carries this type.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Newly written, not ready for work.
    #[default]
    Draft,
    Ready,
    InProgress,
    Test,
    Deploy,
    Pay,
    Complete,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 7] = [
        TicketStatus::Draft,
        TicketStatus::Ready,
        TicketStatus::InProgress,
        TicketStatus::Test,
        TicketStatus::Deploy,
        TicketStatus::Pay,
        TicketStatus::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Draft => "DRAFT",
            TicketStatus::Ready => "READY",
            TicketStatus::InProgress => "IN_PROGRESS",
            TicketStatus::Test => "TEST",
            TicketStatus::Deploy => "DEPLOY",
            TicketStatus::Pay => "PAY",
            TicketStatus::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TicketStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TicketError::InvalidStatus(s.to_string()))
    }
}

/// A unit of scoped work inside a feature phase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub uuid: Uuid,
    pub feature_uuid: Uuid,
    pub phase_uuid: Uuid,
    pub name: String,
    /// Position within the phase.
    pub sequence: i64,
    /// UUIDs of tickets this one waits on.
    pub dependency: Vec<String>,
    pub description: String,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated create-or-edit request.
///
/// `None` fields leave the stored value alone on edit and fall back to the
/// default on create.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketUpsert {
    pub uuid: Uuid,
    pub feature_uuid: Uuid,
    pub phase_uuid: Uuid,
    pub name: String,
    pub sequence: Option<i64>,
    pub dependency: Option<Vec<String>>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
}

impl TicketUpsert {
    pub fn new(uuid: Uuid, feature_uuid: Uuid, phase_uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            feature_uuid,
            phase_uuid,
            name: name.into(),
            sequence: None,
            dependency: None,
            description: None,
            status: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_sequence(mut self, sequence: i64) -> Self {
        self.sequence = Some(sequence);
        self
    }
}
