//! Boundary validation for ticket payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{TicketError, TicketStatus, TicketUpsert};

pub(crate) const REQUIRED_FIELDS_MESSAGE: &str = "feature_uuid, phase_uuid, and name are required";

/// A ticket as it arrives over the wire, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TicketPayload {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub feature_uuid: String,
    #[serde(default)]
    pub phase_uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sequence: Option<i64>,
    #[serde(default)]
    pub dependency: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
    /// Empty means "leave unchanged".
    #[serde(default)]
    pub status: String,
}

impl TicketPayload {
    /// Validate this payload as a create-or-edit of the ticket `uuid`.
    ///
    /// The identifier from the request path wins over any `uuid` in the body.
    /// Checks run in order: ticket id format, status, required fields,
    /// feature/phase id format.
    pub fn into_upsert(self, uuid: &str) -> Result<TicketUpsert, TicketError> {
        let uuid = parse_uuid("ticket uuid", uuid)?;
        let status = parse_status(&self.status)?;

        if self.feature_uuid.is_empty() || self.phase_uuid.is_empty() || self.name.is_empty() {
            return Err(TicketError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        }

        let feature_uuid = parse_uuid("feature uuid", &self.feature_uuid)?;
        let phase_uuid = parse_uuid("phase uuid", &self.phase_uuid)?;

        Ok(TicketUpsert {
            uuid,
            feature_uuid,
            phase_uuid,
            name: self.name,
            sequence: self.sequence,
            dependency: self.dependency,
            description: self.description,
            status,
        })
    }
}

/// Parse an externally supplied identifier.
pub fn parse_uuid(field: &str, value: &str) -> Result<Uuid, TicketError> {
    Uuid::parse_str(value).map_err(|_| TicketError::BadRequest(format!("invalid {} format", field)))
}

/// Parse an optional status. Empty input yields `None`.
pub fn parse_status(value: &str) -> Result<Option<TicketStatus>, TicketError> {
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKET: &str = "5b0f8d37-6f4b-4c5e-9a43-2f3d5a8c1e01";
    const FEATURE: &str = "a1b2c3d4-0000-4000-8000-000000000001";
    const PHASE: &str = "a1b2c3d4-0000-4000-8000-000000000002";

    fn valid_payload() -> TicketPayload {
        TicketPayload {
            feature_uuid: FEATURE.to_string(),
            phase_uuid: PHASE.to_string(),
            name: "Wire up login".to_string(),
            description: Some("Add the login form".to_string()),
            status: "READY".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_payload() {
        let upsert = valid_payload().into_upsert(TICKET).unwrap();
        assert_eq!(upsert.uuid.to_string(), TICKET);
        assert_eq!(upsert.feature_uuid.to_string(), FEATURE);
        assert_eq!(upsert.phase_uuid.to_string(), PHASE);
        assert_eq!(upsert.status, Some(TicketStatus::Ready));
        assert_eq!(upsert.description.as_deref(), Some("Add the login form"));
    }

    #[test]
    fn test_empty_status_means_unchanged() {
        let payload = TicketPayload {
            status: String::new(),
            ..valid_payload()
        };
        assert_eq!(payload.into_upsert(TICKET).unwrap().status, None);
    }

    #[test]
    fn test_invalid_status() {
        let payload = TicketPayload {
            status: "INVALID_STATUS".to_string(),
            ..valid_payload()
        };
        let result = payload.into_upsert(TICKET);
        assert!(matches!(result, Err(TicketError::InvalidStatus(_))));
    }

    #[test]
    fn test_missing_required_fields() {
        for payload in [
            TicketPayload {
                feature_uuid: String::new(),
                ..valid_payload()
            },
            TicketPayload {
                phase_uuid: String::new(),
                ..valid_payload()
            },
            TicketPayload {
                name: String::new(),
                ..valid_payload()
            },
        ] {
            match payload.into_upsert(TICKET) {
                Err(TicketError::Validation(msg)) => assert_eq!(msg, REQUIRED_FIELDS_MESSAGE),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_malformed_ticket_uuid() {
        let result = valid_payload().into_upsert("not-a-uuid");
        assert!(matches!(result, Err(TicketError::BadRequest(_))));
    }

    #[test]
    fn test_malformed_feature_uuid() {
        let payload = TicketPayload {
            feature_uuid: "feature-1".to_string(),
            ..valid_payload()
        };
        let result = payload.into_upsert(TICKET);
        assert!(matches!(result, Err(TicketError::BadRequest(msg)) if msg.contains("feature")));
    }

    #[test]
    fn test_body_uuid_is_ignored() {
        let payload = TicketPayload {
            uuid: Some("00000000-0000-0000-0000-000000000000".to_string()),
            ..valid_payload()
        };
        assert_eq!(payload.into_upsert(TICKET).unwrap().uuid.to_string(), TICKET);
    }

    #[test]
    fn test_payload_deserializes_with_defaults() {
        let payload: TicketPayload = serde_json::from_str(r#"{"name": "only a name"}"#).unwrap();
        assert_eq!(payload.name, "only a name");
        assert!(payload.feature_uuid.is_empty());
        assert!(payload.status.is_empty());
        assert!(payload.description.is_none());
    }
}
