//! SQLite-backed bounty store implementation.

use std::sync::Arc;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use super::{Bounty, BountyError, BountyStore, NewBounty, StatusCounts};
use crate::db::{db_now, from_db_time, to_db_precision, to_db_time, Database};
use crate::metrics::PROOF_INCREMENTS;

const SELECT_COLUMNS: &str = "SELECT id, show, assignee, completed, paid, payment_pending, payment_failed, proof_of_work_count, created, updated FROM bounties";

/// SQLite-backed bounty store.
pub struct SqliteBountyStore {
    db: Arc<Database>,
}

impl SqliteBountyStore {
    /// Create the store, creating its tables if needed.
    pub fn new(db: Arc<Database>) -> Result<Self, BountyError> {
        db.with_conn(|conn| Self::initialize_schema(conn))?;
        Ok(Self { db })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), BountyError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS bounties (
                id INTEGER PRIMARY KEY,
                show INTEGER NOT NULL DEFAULT 0,
                assignee TEXT NOT NULL DEFAULT '',
                completed INTEGER NOT NULL DEFAULT 0,
                paid INTEGER NOT NULL DEFAULT 0,
                payment_pending INTEGER NOT NULL DEFAULT 0,
                payment_failed INTEGER NOT NULL DEFAULT 0,
                proof_of_work_count INTEGER NOT NULL DEFAULT 0,
                created TEXT NOT NULL,
                updated TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_bounties_show ON bounties(show);
            "#,
        )?;
        Ok(())
    }

    fn row_to_bounty(row: &rusqlite::Row) -> rusqlite::Result<Bounty> {
        let created_str: String = row.get(8)?;
        let updated_str: Option<String> = row.get(9)?;

        Ok(Bounty {
            id: row.get(0)?,
            show: row.get(1)?,
            assignee: row.get(2)?,
            completed: row.get(3)?,
            paid: row.get(4)?,
            payment_pending: row.get(5)?,
            payment_failed: row.get(6)?,
            proof_of_work_count: row.get(7)?,
            created: from_db_time(&created_str).unwrap_or_else(Utc::now),
            updated: updated_str.as_deref().and_then(from_db_time),
        })
    }
}

impl BountyStore for SqliteBountyStore {
    fn insert(&self, bounty: NewBounty) -> Result<Bounty, BountyError> {
        let now = db_now();
        let updated = bounty.updated.map(to_db_precision);

        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO bounties (id, show, assignee, completed, paid, payment_pending, payment_failed, proof_of_work_count, created, updated) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    bounty.id,
                    bounty.show,
                    bounty.assignee,
                    bounty.completed,
                    bounty.paid,
                    bounty.payment_pending,
                    bounty.payment_failed,
                    bounty.proof_of_work_count,
                    to_db_time(&now),
                    updated.as_ref().map(to_db_time),
                ],
            )?;

            Ok(Bounty {
                id: conn.last_insert_rowid(),
                show: bounty.show,
                assignee: bounty.assignee,
                completed: bounty.completed,
                paid: bounty.paid,
                payment_pending: bounty.payment_pending,
                payment_failed: bounty.payment_failed,
                proof_of_work_count: bounty.proof_of_work_count,
                created: now,
                updated,
            })
        })
    }

    fn get(&self, id: i64) -> Result<Option<Bounty>, BountyError> {
        self.db.with_conn(|conn| {
            let bounty = conn
                .query_row(
                    &format!("{} WHERE id = ?", SELECT_COLUMNS),
                    params![id],
                    Self::row_to_bounty,
                )
                .optional()?;
            Ok(bounty)
        })
    }

    fn list(&self) -> Result<Vec<Bounty>, BountyError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))?;
            let rows = stmt.query_map([], Self::row_to_bounty)?;

            let mut bounties = Vec::new();
            for row in rows {
                bounties.push(row?);
            }
            Ok(bounties)
        })
    }

    fn status_counts(&self) -> Result<StatusCounts, BountyError> {
        self.db.with_conn(|conn| {
            let counts = conn.query_row(
                r#"
                SELECT
                    COALESCE(SUM(CASE WHEN assignee = '' THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN assignee != '' THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(completed != 0), 0),
                    COALESCE(SUM(paid != 0), 0),
                    COALESCE(SUM(payment_pending != 0), 0),
                    COALESCE(SUM(payment_failed != 0), 0)
                FROM bounties
                WHERE show != 0
                "#,
                [],
                |row| {
                    Ok(StatusCounts {
                        open: row.get(0)?,
                        assigned: row.get(1)?,
                        completed: row.get(2)?,
                        paid: row.get(3)?,
                        pending: row.get(4)?,
                        failed: row.get(5)?,
                    })
                },
            )?;
            Ok(counts)
        })
    }

    fn increment_proof_count(&self, id: i64) -> Result<(), BountyError> {
        let now = db_now();

        let affected = self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE bounties SET proof_of_work_count = proof_of_work_count + 1, updated = ? WHERE id = ?",
                params![to_db_time(&now), id],
            )
            .map_err(BountyError::from)
        })?;

        if affected == 0 {
            warn!("Proof count increment for unknown bounty {}", id);
            PROOF_INCREMENTS.with_label_values(&["not_found"]).inc();
            return Err(BountyError::NotFound(id));
        }

        debug!("Incremented proof count for bounty {}", id);
        PROOF_INCREMENTS.with_label_values(&["applied"]).inc();
        Ok(())
    }

    fn delete_all(&self) -> Result<usize, BountyError> {
        self.db
            .with_conn(|conn| Ok(conn.execute("DELETE FROM bounties", [])?))
    }
}
