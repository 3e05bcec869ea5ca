//! Agent assignments: the binding of one document type to one agent and its
//! workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::workflow::Workflow;

/// The persisted binding between a document type and an agent.
///
/// At most one assignment exists per document type; `document_type_id` is the
/// unique key. Lifetime-bound to its agent: deleting the agent removes the
/// assignment (FK cascade).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentAssignment {
    pub document_type_id: String,
    pub agent_id: String,
    pub workflow: Workflow,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AgentAssignment {
    pub fn new(
        document_type_id: impl Into<String>,
        agent_id: impl Into<String>,
        workflow: Workflow,
    ) -> Self {
        let now = Utc::now();
        Self {
            document_type_id: document_type_id.into(),
            agent_id: agent_id.into(),
            workflow,
            created_at: now,
            updated_at: now,
        }
    }
}
