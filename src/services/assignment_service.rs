//! Assignment store: document-type → agent → workflow bindings.
//!
//! All mutation of the assignment table goes through this service. Upserts
//! are last-write-wins on the document-type id with no optimistic-concurrency
//! check; unassign is idempotent. `test_assignment` runs a sample document
//! through the bound workflow and always returns a `TestResult` for an
//! existing assignment: step failures fold into the result status, they are
//! not errors.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Agent, AgentAssignment, TestResult, Workflow};
use crate::domain::ports::{AgentRepository, AssignmentRepository, DocumentRepository};
use crate::services::workflow_engine::WorkflowEngine;

pub struct AssignmentService {
    assignments: Arc<dyn AssignmentRepository>,
    agents: Arc<dyn AgentRepository>,
    documents: Arc<dyn DocumentRepository>,
    engine: WorkflowEngine,
}

impl AssignmentService {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        agents: Arc<dyn AgentRepository>,
        documents: Arc<dyn DocumentRepository>,
        engine: WorkflowEngine,
    ) -> Self {
        Self {
            assignments,
            agents,
            documents,
            engine,
        }
    }

    /// Bind an agent and workflow to a document type (upsert).
    ///
    /// Validates the workflow, resolves the agent, and rejects workflows
    /// whose step actions exceed the agent's capability set. The fallback
    /// action is exempt from the capability check; fallbacks route to the
    /// default reviewer path regardless.
    pub async fn assign(
        &self,
        document_type_id: &str,
        agent_id: &str,
        workflow: Workflow,
    ) -> DomainResult<AgentAssignment> {
        if document_type_id.trim().is_empty() {
            return Err(DomainError::ValidationFailed(
                "documentTypeId must not be empty".to_string(),
            ));
        }
        if agent_id.trim().is_empty() {
            return Err(DomainError::ValidationFailed(
                "agentId must not be empty".to_string(),
            ));
        }
        workflow.validate().map_err(DomainError::ValidationFailed)?;

        let agent = self.resolve_agent(agent_id).await?;
        for step in &workflow.steps {
            if !agent.can_perform(step.action) {
                return Err(DomainError::ValidationFailed(format!(
                    "Agent {} cannot perform step action {}",
                    agent.id, step.action
                )));
            }
        }

        let assignment = match self.assignments.get(document_type_id).await? {
            Some(mut existing) => {
                existing.agent_id = agent_id.to_string();
                existing.workflow = workflow;
                existing.updated_at = Utc::now();
                existing
            }
            None => AgentAssignment::new(document_type_id, agent_id, workflow),
        };

        self.assignments.upsert(&assignment).await?;
        info!(
            document_type_id = %assignment.document_type_id,
            agent_id = %assignment.agent_id,
            "Assignment saved"
        );
        Ok(assignment)
    }

    /// Remove the assignment for a document type. Idempotent: unassigning an
    /// already-unassigned type is a no-op success.
    pub async fn unassign(&self, document_type_id: &str) -> DomainResult<()> {
        self.assignments.delete(document_type_id).await?;
        debug!(document_type_id, "Assignment removed");
        Ok(())
    }

    pub async fn get_assignment(
        &self,
        document_type_id: &str,
    ) -> DomainResult<Option<AgentAssignment>> {
        self.assignments.get(document_type_id).await
    }

    pub async fn list_assignments(&self) -> DomainResult<Vec<AgentAssignment>> {
        self.assignments.list().await
    }

    /// Run the sample document through the workflow bound to the document
    /// type. Fails with `NotAssigned` when no binding exists; otherwise the
    /// run outcome is data in the returned `TestResult`.
    pub async fn test_assignment(
        &self,
        document_type_id: &str,
        sample_document_id: &str,
    ) -> DomainResult<TestResult> {
        let assignment = self
            .assignments
            .get(document_type_id)
            .await?
            .ok_or_else(|| DomainError::NotAssigned(document_type_id.to_string()))?;

        let agent = self.resolve_agent(&assignment.agent_id).await?;
        let document = self
            .documents
            .get(sample_document_id)
            .await?
            .ok_or_else(|| DomainError::DocumentNotFound(sample_document_id.to_string()))?;

        let started_at = Utc::now();
        let run = self
            .engine
            .run(&agent, &assignment.workflow, &document, document_type_id)
            .await;
        let finished_at = Utc::now();

        info!(
            document_type_id,
            sample_document_id,
            status = %run.status,
            steps = run.steps.len(),
            "Assignment test finished"
        );

        Ok(TestResult {
            id: Uuid::new_v4(),
            document_type_id: document_type_id.to_string(),
            agent_id: assignment.agent_id,
            sample_document_id: sample_document_id.to_string(),
            status: run.status,
            steps: run.steps,
            fallback: run.fallback,
            started_at,
            finished_at,
        })
    }

    async fn resolve_agent(&self, agent_id: &str) -> DomainResult<Agent> {
        self.agents
            .get(agent_id)
            .await?
            .ok_or_else(|| DomainError::AgentNotFound(agent_id.to_string()))
    }
}
