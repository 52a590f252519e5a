//! Testing utilities: a mock builder client and data fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use bountydesk_core::testing::{fixtures, MockBuilderClient};
//!
//! let client = Arc::new(MockBuilderClient::new());
//! let dispatcher = WorkflowDispatcher::new(client.clone(), features, fixtures::builder_config());
//! ```

mod mock_builder;

pub use mock_builder::MockBuilderClient;

/// Test fixtures and helper functions.
pub mod fixtures {
    use uuid::Uuid;

    use crate::bounty::NewBounty;
    use crate::config::BuilderConfig;
    use crate::feature::{Feature, FeatureError, FeaturePhase, SqliteFeatureDirectory, Workspace};
    use crate::ticket::TicketUpsert;

    /// Builder config with every required field set.
    pub fn builder_config() -> BuilderConfig {
        BuilderConfig {
            api_key: Some("builder-key".to_string()),
            callback_host: Some("https://desk.example.com".to_string()),
            ..Default::default()
        }
    }

    /// Insert a workspace, a feature in it and one phase `<feature>-phase`.
    pub fn seed_feature(
        directory: &SqliteFeatureDirectory,
        workspace_uuid: &str,
        feature_uuid: &str,
    ) -> Result<(), FeatureError> {
        directory.insert_workspace(&Workspace {
            uuid: workspace_uuid.to_string(),
            name: "Hive".to_string(),
            mission: "Coordinate work".to_string(),
            tactics: "Ship small tickets".to_string(),
        })?;
        directory.insert_feature(&Feature {
            uuid: feature_uuid.to_string(),
            workspace_uuid: workspace_uuid.to_string(),
            name: "Ticket search".to_string(),
            brief: "Find tickets quickly".to_string(),
            requirements: "Search by name".to_string(),
            architecture: "SQLite index".to_string(),
        })?;
        directory.insert_phase(&FeaturePhase {
            uuid: format!("{}-phase", feature_uuid),
            feature_uuid: feature_uuid.to_string(),
            name: "MVP".to_string(),
        })
    }

    /// A new ticket in fresh feature and phase ids.
    pub fn ticket_upsert(name: &str) -> TicketUpsert {
        TicketUpsert::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), name)
    }

    /// A visible bounty with the given assignee.
    pub fn visible_bounty(assignee: &str) -> NewBounty {
        NewBounty {
            show: true,
            assignee: assignee.to_string(),
            ..Default::default()
        }
    }
}
