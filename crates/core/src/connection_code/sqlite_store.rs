//! SQLite-backed connection code store.

use std::sync::Arc;

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use tracing::{debug, info};

use super::{
    ConnectionCode, ConnectionCodeError, ConnectionCodeShort, ConnectionCodeStore, DispenseOrder,
    NewConnectionCode,
};
use crate::db::{db_now, from_db_time, to_db_precision, to_db_time, Database};
use crate::metrics::{CONNECTION_CODES_DISPENSED, CONNECTION_CODES_ISSUED};

/// SQLite-backed connection code store.
pub struct SqliteConnectionCodeStore {
    db: Arc<Database>,
    order: DispenseOrder,
}

impl SqliteConnectionCodeStore {
    /// Create the store, creating its table if needed.
    pub fn new(db: Arc<Database>, order: DispenseOrder) -> Result<Self, ConnectionCodeError> {
        db.with_conn(|conn| Self::initialize_schema(conn))?;
        Ok(Self { db, order })
    }

    pub fn dispense_order(&self) -> DispenseOrder {
        self.order
    }

    fn initialize_schema(conn: &Connection) -> Result<(), ConnectionCodeError> {
        // `seq` records insertion order; `id` is caller-supplied and may repeat.
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS connection_codes (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id INTEGER NOT NULL,
                connection_string TEXT NOT NULL,
                date_created TEXT NOT NULL,
                is_used INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_connection_codes_unused
                ON connection_codes(is_used, date_created);
            "#,
        )?;
        Ok(())
    }
}

impl ConnectionCodeStore for SqliteConnectionCodeStore {
    fn issue_batch(
        &self,
        codes: Vec<NewConnectionCode>,
    ) -> Result<Vec<ConnectionCode>, ConnectionCodeError> {
        if codes.is_empty() {
            return Err(ConnectionCodeError::EmptyInput);
        }

        let now = db_now();

        let issued = self.db.with_conn(|conn| -> Result<_, ConnectionCodeError> {
            let tx = conn.transaction()?;
            let mut issued = Vec::with_capacity(codes.len());
            {
                let mut stmt = tx.prepare_cached(
                    "INSERT INTO connection_codes (id, connection_string, date_created, is_used) VALUES (?, ?, ?, 0)",
                )?;
                for code in codes {
                    let date_created = code.date_created.map_or(now, to_db_precision);
                    stmt.execute(params![
                        code.id,
                        code.connection_string,
                        to_db_time(&date_created)
                    ])?;
                    issued.push(ConnectionCode {
                        id: code.id,
                        connection_string: code.connection_string,
                        date_created,
                        is_used: false,
                    });
                }
            }
            tx.commit()?;
            Ok(issued)
        })?;

        info!("Issued {} connection codes", issued.len());
        CONNECTION_CODES_ISSUED.inc_by(issued.len() as u64);
        Ok(issued)
    }

    fn dispense_one(&self) -> Result<Option<ConnectionCodeShort>, ConnectionCodeError> {
        let select = format!(
            "SELECT seq, connection_string, date_created FROM connection_codes WHERE is_used = 0 ORDER BY date_created {}, seq ASC LIMIT 1",
            self.order.sql_direction()
        );

        let dispensed = self.db.with_conn(|conn| -> Result<_, ConnectionCodeError> {
            // IMMEDIATE takes the write lock up front, so selection and
            // marking cannot interleave with another dispenser.
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let candidate = tx
                .query_row(&select, [], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                })
                .optional()?;

            let Some((seq, connection_string, date_created)) = candidate else {
                return Ok(None);
            };

            let marked = tx.execute(
                "UPDATE connection_codes SET is_used = 1 WHERE seq = ? AND is_used = 0",
                params![seq],
            )?;
            if marked != 1 {
                return Err(ConnectionCodeError::Database(format!(
                    "connection code {} was consumed concurrently",
                    seq
                )));
            }
            tx.commit()?;

            let date_created = from_db_time(&date_created).ok_or_else(|| {
                ConnectionCodeError::Database(format!(
                    "invalid date_created stored for connection code {}",
                    seq
                ))
            })?;

            Ok(Some(ConnectionCodeShort {
                connection_string,
                date_created,
            }))
        })?;

        match &dispensed {
            Some(code) => {
                debug!("Dispensed connection code created at {}", code.date_created);
                CONNECTION_CODES_DISPENSED
                    .with_label_values(&["dispensed"])
                    .inc();
            }
            None => {
                debug!("No unused connection codes available");
                CONNECTION_CODES_DISPENSED
                    .with_label_values(&["exhausted"])
                    .inc();
            }
        }

        Ok(dispensed)
    }

    fn count_unused(&self) -> Result<i64, ConnectionCodeError> {
        self.db.with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT COUNT(*) FROM connection_codes WHERE is_used = 0",
                [],
                |row| row.get(0),
            )?)
        })
    }
}
