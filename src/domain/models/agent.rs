//! Processing agents.
//!
//! An agent is a named automated processing entity created by an external
//! admin workflow. The core only reads agents; the CLI exposes admin
//! create/delete for operational convenience.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::workflow::StepAction;

/// A named processing entity with a typed capability set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent identifier (slug, e.g. "agent-1").
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Optional description of what the agent does.
    #[serde(default)]
    pub description: Option<String>,

    /// Step actions this agent is able to perform.
    #[serde(default)]
    pub capabilities: BTreeSet<StepAction>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Agent {
    /// Create a new agent with the given capabilities.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        capabilities: impl IntoIterator<Item = StepAction>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            capabilities: capabilities.into_iter().collect(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the agent can perform the given step action.
    pub fn can_perform(&self, action: StepAction) -> bool {
        self.capabilities.contains(&action)
    }
}
