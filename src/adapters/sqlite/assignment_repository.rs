//! SQLite implementation of the AssignmentRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::DomainResult;
use crate::domain::models::AgentAssignment;
use crate::domain::ports::AssignmentRepository;

#[derive(Clone)]
pub struct SqliteAssignmentRepository {
    pool: SqlitePool,
}

impl SqliteAssignmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentRepository for SqliteAssignmentRepository {
    async fn list(&self) -> DomainResult<Vec<AgentAssignment>> {
        let rows: Vec<AssignmentRow> = sqlx::query_as(
            "SELECT document_type_id, agent_id, workflow, created_at, updated_at
             FROM agent_assignments ORDER BY document_type_id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AssignmentRow::try_into_assignment).collect()
    }

    async fn get(&self, document_type_id: &str) -> DomainResult<Option<AgentAssignment>> {
        let row: Option<AssignmentRow> = sqlx::query_as(
            "SELECT document_type_id, agent_id, workflow, created_at, updated_at
             FROM agent_assignments WHERE document_type_id = ?",
        )
        .bind(document_type_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(AssignmentRow::try_into_assignment).transpose()
    }

    async fn upsert(&self, assignment: &AgentAssignment) -> DomainResult<()> {
        let workflow_json = serde_json::to_string(&assignment.workflow)?;

        // Last write wins on document_type_id; created_at survives replacement.
        sqlx::query(
            "INSERT INTO agent_assignments (document_type_id, agent_id, workflow, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(document_type_id) DO UPDATE SET
                 agent_id = excluded.agent_id,
                 workflow = excluded.workflow,
                 updated_at = excluded.updated_at",
        )
        .bind(&assignment.document_type_id)
        .bind(&assignment.agent_id)
        .bind(&workflow_json)
        .bind(assignment.created_at.to_rfc3339())
        .bind(assignment.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, document_type_id: &str) -> DomainResult<()> {
        // Deleting an absent row is a no-op success.
        sqlx::query("DELETE FROM agent_assignments WHERE document_type_id = ?")
            .bind(document_type_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct AssignmentRow {
    document_type_id: String,
    agent_id: String,
    workflow: String,
    created_at: String,
    updated_at: String,
}

impl AssignmentRow {
    fn try_into_assignment(self) -> DomainResult<AgentAssignment> {
        use crate::adapters::sqlite::{parse_datetime, parse_json};

        Ok(AgentAssignment {
            document_type_id: self.document_type_id,
            agent_id: self.agent_id,
            workflow: parse_json(&self.workflow)?,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}
