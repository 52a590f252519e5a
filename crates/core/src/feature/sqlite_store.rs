//! SQLite-backed feature directory.

use std::sync::Arc;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::{Feature, FeatureDirectory, FeatureError, FeaturePhase, Workspace};
use crate::db::Database;

pub struct SqliteFeatureDirectory {
    db: Arc<Database>,
}

impl SqliteFeatureDirectory {
    /// Create the directory, creating its tables if needed.
    pub fn new(db: Arc<Database>) -> Result<Self, FeatureError> {
        db.with_conn(|conn| Self::initialize_schema(conn))?;
        Ok(Self { db })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), FeatureError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS workspaces (
                uuid TEXT PRIMARY KEY,
                name TEXT NOT NULL DEFAULT '',
                mission TEXT NOT NULL DEFAULT '',
                tactics TEXT NOT NULL DEFAULT ''
            );

            CREATE TABLE IF NOT EXISTS features (
                uuid TEXT PRIMARY KEY,
                workspace_uuid TEXT NOT NULL,
                name TEXT NOT NULL DEFAULT '',
                brief TEXT NOT NULL DEFAULT '',
                requirements TEXT NOT NULL DEFAULT '',
                architecture TEXT NOT NULL DEFAULT ''
            );

            CREATE TABLE IF NOT EXISTS feature_phases (
                uuid TEXT PRIMARY KEY,
                feature_uuid TEXT NOT NULL,
                name TEXT NOT NULL DEFAULT ''
            );
            "#,
        )?;
        Ok(())
    }

    /// Insert or replace a workspace.
    pub fn insert_workspace(&self, workspace: &Workspace) -> Result<(), FeatureError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO workspaces (uuid, name, mission, tactics) VALUES (?, ?, ?, ?)",
                params![
                    workspace.uuid,
                    workspace.name,
                    workspace.mission,
                    workspace.tactics
                ],
            )?;
            Ok(())
        })
    }

    /// Insert or replace a feature.
    pub fn insert_feature(&self, feature: &Feature) -> Result<(), FeatureError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO features (uuid, workspace_uuid, name, brief, requirements, architecture) VALUES (?, ?, ?, ?, ?, ?)",
                params![
                    feature.uuid,
                    feature.workspace_uuid,
                    feature.name,
                    feature.brief,
                    feature.requirements,
                    feature.architecture
                ],
            )?;
            Ok(())
        })
    }

    /// Insert or replace a phase.
    pub fn insert_phase(&self, phase: &FeaturePhase) -> Result<(), FeatureError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO feature_phases (uuid, feature_uuid, name) VALUES (?, ?, ?)",
                params![phase.uuid, phase.feature_uuid, phase.name],
            )?;
            Ok(())
        })
    }

    fn get_workspace(&self, uuid: &str) -> Result<Option<Workspace>, FeatureError> {
        self.db.with_conn(|conn| {
            let workspace = conn
                .query_row(
                    "SELECT uuid, name, mission, tactics FROM workspaces WHERE uuid = ?",
                    params![uuid],
                    |row| {
                        Ok(Workspace {
                            uuid: row.get(0)?,
                            name: row.get(1)?,
                            mission: row.get(2)?,
                            tactics: row.get(3)?,
                        })
                    },
                )
                .optional()?;
            Ok(workspace)
        })
    }
}

impl FeatureDirectory for SqliteFeatureDirectory {
    fn get_feature(&self, uuid: &str) -> Result<Option<Feature>, FeatureError> {
        self.db.with_conn(|conn| {
            let feature = conn
                .query_row(
                    "SELECT uuid, workspace_uuid, name, brief, requirements, architecture FROM features WHERE uuid = ?",
                    params![uuid],
                    |row| {
                        Ok(Feature {
                            uuid: row.get(0)?,
                            workspace_uuid: row.get(1)?,
                            name: row.get(2)?,
                            brief: row.get(3)?,
                            requirements: row.get(4)?,
                            architecture: row.get(5)?,
                        })
                    },
                )
                .optional()?;
            Ok(feature)
        })
    }

    fn get_phase(&self, uuid: &str) -> Result<Option<FeaturePhase>, FeatureError> {
        self.db.with_conn(|conn| {
            let phase = conn
                .query_row(
                    "SELECT uuid, feature_uuid, name FROM feature_phases WHERE uuid = ?",
                    params![uuid],
                    |row| {
                        Ok(FeaturePhase {
                            uuid: row.get(0)?,
                            feature_uuid: row.get(1)?,
                            name: row.get(2)?,
                        })
                    },
                )
                .optional()?;
            Ok(phase)
        })
    }

    fn product_brief(&self, workspace_uuid: &str) -> Result<String, FeatureError> {
        let workspace = self
            .get_workspace(workspace_uuid)?
            .ok_or_else(|| FeatureError::WorkspaceNotFound(workspace_uuid.to_string()))?;
        debug!("Loaded product brief for workspace {}", workspace_uuid);
        Ok(workspace.brief())
    }

    fn feature_brief(&self, feature_uuid: &str) -> Result<String, FeatureError> {
        let feature = self
            .get_feature(feature_uuid)?
            .ok_or_else(|| FeatureError::FeatureNotFound(feature_uuid.to_string()))?;
        debug!("Loaded feature brief for feature {}", feature_uuid);
        Ok(feature.brief_text())
    }
}
