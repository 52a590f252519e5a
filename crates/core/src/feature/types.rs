use serde::{Deserialize, Serialize};

/// A product workspace. Source of the product brief.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Workspace {
    pub uuid: String,
    pub name: String,
    pub mission: String,
    pub tactics: String,
}

impl Workspace {
    /// Render the brief handed to the builder service.
    pub fn brief(&self) -> String {
        format!(
            "Product: {}.\nProduct Brief:\n* Mission: {}.\n* Objectives: {}",
            self.name, self.mission, self.tactics
        )
    }
}

/// A feature within a workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    pub uuid: String,
    pub workspace_uuid: String,
    pub name: String,
    pub brief: String,
    pub requirements: String,
    pub architecture: String,
}

impl Feature {
    pub fn brief_text(&self) -> String {
        format!(
            "Feature: {}.\nBrief:\n* {}.\n* Requirements: {}.\n* Architecture: {}",
            self.name, self.brief, self.requirements, self.architecture
        )
    }
}

/// A phase of a feature. Tickets are grouped by phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeaturePhase {
    pub uuid: String,
    pub feature_uuid: String,
    pub name: String,
}
