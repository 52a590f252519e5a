//! SQLite-backed ticket store implementation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use super::{Ticket, TicketError, TicketStore, TicketUpsert};
use crate::db::{db_now, to_db_time, Database};

const SELECT_COLUMNS: &str = "SELECT uuid, feature_uuid, phase_uuid, name, sequence, dependency, description, status, created_at, updated_at FROM tickets";

/// SQLite-backed ticket store.
pub struct SqliteTicketStore {
    db: Arc<Database>,
}

impl SqliteTicketStore {
    /// Create the store, creating its tables if needed.
    pub fn new(db: Arc<Database>) -> Result<Self, TicketError> {
        db.with_conn(|conn| Self::initialize_schema(conn))?;
        Ok(Self { db })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), TicketError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tickets (
                uuid TEXT PRIMARY KEY,
                feature_uuid TEXT NOT NULL,
                phase_uuid TEXT NOT NULL,
                name TEXT NOT NULL,
                sequence INTEGER NOT NULL DEFAULT 0,
                dependency TEXT NOT NULL DEFAULT '[]',
                description TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tickets_phase ON tickets(feature_uuid, phase_uuid);
            "#,
        )?;
        Ok(())
    }

    fn row_to_ticket(row: &rusqlite::Row) -> rusqlite::Result<Ticket> {
        let uuid: String = row.get(0)?;
        let feature_uuid: String = row.get(1)?;
        let phase_uuid: String = row.get(2)?;
        let dependency_json: String = row.get(5)?;
        let status_str: String = row.get(7)?;
        let created_str: String = row.get(8)?;
        let updated_str: String = row.get(9)?;

        Ok(Ticket {
            uuid: parse_stored_uuid(0, &uuid)?,
            feature_uuid: parse_stored_uuid(1, &feature_uuid)?,
            phase_uuid: parse_stored_uuid(2, &phase_uuid)?,
            name: row.get(3)?,
            sequence: row.get(4)?,
            dependency: serde_json::from_str(&dependency_json)
                .map_err(|e| conversion_failure(5, e))?,
            description: row.get(6)?,
            status: status_str.parse().map_err(|e| conversion_failure(7, e))?,
            created_at: parse_stored_time(8, &created_str)?,
            updated_at: parse_stored_time(9, &updated_str)?,
        })
    }

    fn fetch(conn: &Connection, uuid: &Uuid) -> Result<Option<Ticket>, TicketError> {
        let ticket = conn
            .query_row(
                &format!("{} WHERE uuid = ?", SELECT_COLUMNS),
                params![uuid.to_string()],
                Self::row_to_ticket,
            )
            .optional()?;
        Ok(ticket)
    }
}

fn conversion_failure<E>(column: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
}

fn parse_stored_uuid(column: usize, value: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| conversion_failure(column, e))
}

fn parse_stored_time(column: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_failure(column, e))
}

fn encode_dependency(dependency: &[String]) -> Result<String, TicketError> {
    serde_json::to_string(dependency).map_err(|e| TicketError::Database(e.to_string()))
}

impl TicketStore for SqliteTicketStore {
    fn get(&self, uuid: &Uuid) -> Result<Option<Ticket>, TicketError> {
        self.db.with_conn(|conn| Self::fetch(conn, uuid))
    }

    fn create_or_edit(&self, upsert: TicketUpsert) -> Result<Ticket, TicketError> {
        let now = db_now();

        let (ticket, created) = self.db.with_conn(|conn| -> Result<_, TicketError> {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let result = match Self::fetch(&tx, &upsert.uuid)? {
                Some(existing) => {
                    let ticket = Ticket {
                        uuid: existing.uuid,
                        feature_uuid: upsert.feature_uuid,
                        phase_uuid: upsert.phase_uuid,
                        name: upsert.name,
                        sequence: upsert.sequence.unwrap_or(existing.sequence),
                        dependency: upsert.dependency.unwrap_or(existing.dependency),
                        description: upsert.description.unwrap_or(existing.description),
                        status: upsert.status.unwrap_or(existing.status),
                        created_at: existing.created_at,
                        updated_at: now,
                    };

                    tx.execute(
                        "UPDATE tickets SET feature_uuid = ?, phase_uuid = ?, name = ?, sequence = ?, dependency = ?, description = ?, status = ?, updated_at = ? WHERE uuid = ?",
                        params![
                            ticket.feature_uuid.to_string(),
                            ticket.phase_uuid.to_string(),
                            ticket.name,
                            ticket.sequence,
                            encode_dependency(&ticket.dependency)?,
                            ticket.description,
                            ticket.status.as_str(),
                            to_db_time(&ticket.updated_at),
                            ticket.uuid.to_string(),
                        ],
                    )?;
                    (ticket, false)
                }
                None => {
                    let ticket = Ticket {
                        uuid: upsert.uuid,
                        feature_uuid: upsert.feature_uuid,
                        phase_uuid: upsert.phase_uuid,
                        name: upsert.name,
                        sequence: upsert.sequence.unwrap_or(0),
                        dependency: upsert.dependency.unwrap_or_default(),
                        description: upsert.description.unwrap_or_default(),
                        status: upsert.status.unwrap_or_default(),
                        created_at: now,
                        updated_at: now,
                    };

                    tx.execute(
                        "INSERT INTO tickets (uuid, feature_uuid, phase_uuid, name, sequence, dependency, description, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                        params![
                            ticket.uuid.to_string(),
                            ticket.feature_uuid.to_string(),
                            ticket.phase_uuid.to_string(),
                            ticket.name,
                            ticket.sequence,
                            encode_dependency(&ticket.dependency)?,
                            ticket.description,
                            ticket.status.as_str(),
                            to_db_time(&ticket.created_at),
                            to_db_time(&ticket.updated_at),
                        ],
                    )?;
                    (ticket, true)
                }
            };

            tx.commit()?;
            Ok(result)
        })?;

        if created {
            info!("Created ticket {} ({})", ticket.uuid, ticket.status);
        } else {
            debug!("Edited ticket {} ({})", ticket.uuid, ticket.status);
        }
        Ok(ticket)
    }

    fn update_description(&self, uuid: &Uuid, description: &str) -> Result<Ticket, TicketError> {
        let now = db_now();

        self.db.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE tickets SET description = ?, updated_at = ? WHERE uuid = ?",
                params![description, to_db_time(&now), uuid.to_string()],
            )?;

            if affected == 0 {
                return Err(TicketError::NotFound(uuid.to_string()));
            }

            Self::fetch(conn, uuid)?.ok_or_else(|| TicketError::NotFound(uuid.to_string()))
        })
    }

    fn delete(&self, uuid: &Uuid) -> Result<Ticket, TicketError> {
        let ticket = self.db.with_conn(|conn| -> Result<_, TicketError> {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let ticket =
                Self::fetch(&tx, uuid)?.ok_or_else(|| TicketError::NotFound(uuid.to_string()))?;
            tx.execute(
                "DELETE FROM tickets WHERE uuid = ?",
                params![uuid.to_string()],
            )?;
            tx.commit()?;
            Ok(ticket)
        })?;

        info!("Deleted ticket {}", ticket.uuid);
        Ok(ticket)
    }

    fn list_by_phase(
        &self,
        feature_uuid: &Uuid,
        phase_uuid: &Uuid,
    ) -> Result<Vec<Ticket>, TicketError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{} WHERE feature_uuid = ? AND phase_uuid = ? ORDER BY sequence ASC, created_at ASC",
                SELECT_COLUMNS
            ))?;
            let rows = stmt.query_map(
                params![feature_uuid.to_string(), phase_uuid.to_string()],
                Self::row_to_ticket,
            )?;

            let mut tickets = Vec::new();
            for row in rows {
                tickets.push(row?);
            }
            Ok(tickets)
        })
    }
}
