//! Assignment repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::AgentAssignment;

/// Repository interface for agent-assignment persistence.
///
/// This is the sole write path to the assignment table. `upsert` is
/// last-write-wins on `document_type_id`; `delete` is idempotent.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// List all assignments.
    async fn list(&self) -> DomainResult<Vec<AgentAssignment>>;

    /// Get the assignment for a document type, if any.
    async fn get(&self, document_type_id: &str) -> DomainResult<Option<AgentAssignment>>;

    /// Insert or replace the assignment for its document type.
    async fn upsert(&self, assignment: &AgentAssignment) -> DomainResult<()>;

    /// Remove the assignment for a document type. Removing an absent row is
    /// a no-op success.
    async fn delete(&self, document_type_id: &str) -> DomainResult<()>;
}
