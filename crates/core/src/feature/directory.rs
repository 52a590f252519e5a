use thiserror::Error;

use super::{Feature, FeaturePhase};
use crate::db::DatabaseError;
use crate::error::ErrorKind;

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl FeatureError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FeatureError::FeatureNotFound(_) | FeatureError::WorkspaceNotFound(_) => {
                ErrorKind::NotFound
            }
            FeatureError::Database(_) => ErrorKind::Internal,
        }
    }
}

impl From<DatabaseError> for FeatureError {
    fn from(e: DatabaseError) -> Self {
        FeatureError::Database(e.to_string())
    }
}

impl From<rusqlite::Error> for FeatureError {
    fn from(e: rusqlite::Error) -> Self {
        FeatureError::Database(e.to_string())
    }
}

/// Read access to features, phases and the briefs derived from them.
pub trait FeatureDirectory: Send + Sync {
    fn get_feature(&self, uuid: &str) -> Result<Option<Feature>, FeatureError>;

    fn get_phase(&self, uuid: &str) -> Result<Option<FeaturePhase>, FeatureError>;

    /// Brief of the workspace `workspace_uuid`.
    fn product_brief(&self, workspace_uuid: &str) -> Result<String, FeatureError>;

    /// Brief of the feature `feature_uuid`.
    fn feature_brief(&self, feature_uuid: &str) -> Result<String, FeatureError>;
}
