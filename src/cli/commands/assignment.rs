//! Assignment CLI commands.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput};
use crate::cli::table::{list_table, render_list};
use crate::cli::types::AssignmentCommands;
use crate::domain::models::{AgentAssignment, FallbackResult, StepResult, TestResult, Workflow};

#[derive(Debug, serde::Serialize)]
pub struct AssignmentOutput {
    pub document_type_id: String,
    pub agent_id: String,
    pub steps: usize,
    pub fallback: String,
    pub updated_at: String,
}

impl From<&AgentAssignment> for AssignmentOutput {
    fn from(assignment: &AgentAssignment) -> Self {
        Self {
            document_type_id: assignment.document_type_id.clone(),
            agent_id: assignment.agent_id.clone(),
            steps: assignment.workflow.steps.len(),
            fallback: assignment.workflow.fallback.action.to_string(),
            updated_at: assignment.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct AssignmentListOutput {
    pub assignments: Vec<AssignmentOutput>,
    pub total: usize,
}

impl CommandOutput for AssignmentListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["document type", "agent", "steps", "fallback", "updated"]);
        for a in &self.assignments {
            table.add_row(vec![
                a.document_type_id.clone(),
                a.agent_id.clone(),
                a.steps.to_string(),
                a.fallback.clone(),
                a.updated_at.clone(),
            ]);
        }
        render_list("assignment", &table, self.total)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct AssignmentActionOutput {
    pub success: bool,
    pub message: String,
}

impl CommandOutput for AssignmentActionOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct TestRunOutput {
    pub id: String,
    pub document_type_id: String,
    pub agent_id: String,
    pub status: String,
    pub steps: Vec<StepResult>,
    pub fallback: Option<FallbackResult>,
}

impl From<TestResult> for TestRunOutput {
    fn from(result: TestResult) -> Self {
        Self {
            id: result.id.to_string(),
            document_type_id: result.document_type_id,
            agent_id: result.agent_id,
            status: result.status.to_string(),
            steps: result.steps,
            fallback: result.fallback,
        }
    }
}

impl CommandOutput for TestRunOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Test run {}", self.id),
            format!("Status: {}", self.status),
        ];

        for step in &self.steps {
            let mark = if step.succeeded { "ok" } else { "FAILED" };
            let mut line = format!(
                "  {} {} ({} attempt(s), {}ms)",
                mark, step.action, step.attempts, step.duration_ms
            );
            if let Some(error) = &step.error {
                line.push_str(&format!(": {error}"));
            }
            lines.push(line);
        }

        if let Some(fallback) = &self.fallback {
            let mark = if fallback.succeeded { "ok" } else { "FAILED" };
            let mut line = format!("  fallback: {} {}", mark, fallback.action);
            if fallback.notified {
                line.push_str(" (reviewer notified)");
            }
            lines.push(line);
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(
    cmd: AssignmentCommands,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let ctx = AppContext::init(config_path).await?;

    match cmd {
        AssignmentCommands::List => {
            let assignments = ctx.service.list_assignments().await?;
            let outputs: Vec<AssignmentOutput> =
                assignments.iter().map(AssignmentOutput::from).collect();
            let total = outputs.len();
            output(
                &AssignmentListOutput {
                    assignments: outputs,
                    total,
                },
                json,
            );
        }
        AssignmentCommands::Set {
            document_type_id,
            agent,
            workflow,
        } => {
            let raw = std::fs::read_to_string(&workflow)
                .with_context(|| format!("Failed to read {}", workflow.display()))?;
            let workflow: Workflow = serde_json::from_str(&raw)
                .context("Failed to parse workflow definition")?;

            let assignment = ctx
                .service
                .assign(&document_type_id, &agent, workflow)
                .await?;
            output(
                &AssignmentActionOutput {
                    success: true,
                    message: format!(
                        "Assigned agent '{}' to document type '{}'",
                        assignment.agent_id, assignment.document_type_id
                    ),
                },
                json,
            );
        }
        AssignmentCommands::Remove { document_type_id } => {
            ctx.service.unassign(&document_type_id).await?;
            output(
                &AssignmentActionOutput {
                    success: true,
                    message: format!("Assignment for '{document_type_id}' removed"),
                },
                json,
            );
        }
        AssignmentCommands::Test {
            document_type_id,
            document,
        } => {
            let result = ctx
                .service
                .test_assignment(&document_type_id, &document)
                .await?;
            output(&TestRunOutput::from(result), json);
        }
    }

    Ok(())
}
