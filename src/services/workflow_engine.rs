//! Workflow execution engine.
//!
//! Runs a workflow's steps strictly in sequence against one document,
//! honoring per-step timeout and retry counts. A step exhausting its retries
//! aborts the remaining sequence and invokes the fallback exactly once.
//! Executor errors are captured as failed attempts, never propagated: the
//! caller always gets a `WorkflowRun` back.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::models::{
    Agent, Document, FallbackResult, RunStatus, StepResult, Workflow, WorkflowRun, WorkflowStep,
};
use crate::domain::ports::{AgentExecutor, FallbackNotice, Notifier};

/// Drives workflow step ordering, retries, and fallback.
pub struct WorkflowEngine {
    executor: Arc<dyn AgentExecutor>,
    notifier: Arc<dyn Notifier>,
}

impl WorkflowEngine {
    pub fn new(executor: Arc<dyn AgentExecutor>, notifier: Arc<dyn Notifier>) -> Self {
        Self { executor, notifier }
    }

    /// Execute `workflow` against `document` on behalf of `agent`.
    ///
    /// Step N+1 never starts before step N's outcome is determined. An empty
    /// step list triggers the fallback immediately.
    pub async fn run(
        &self,
        agent: &Agent,
        workflow: &Workflow,
        document: &Document,
        document_type_id: &str,
    ) -> WorkflowRun {
        let mut steps = Vec::with_capacity(workflow.steps.len());

        for step in &workflow.steps {
            let result = self.run_step(agent, step, &document.content).await;
            let failed = !result.succeeded;
            let reason = if failed {
                format!(
                    "step {} failed after {} attempt(s): {}",
                    result.action,
                    result.attempts,
                    result.error.as_deref().unwrap_or("unknown error")
                )
            } else {
                String::new()
            };
            steps.push(result);

            if failed {
                let fallback = self
                    .run_fallback(agent, workflow, document, document_type_id, &reason)
                    .await;
                let status = if fallback.succeeded {
                    RunStatus::FellBack
                } else {
                    RunStatus::Failed
                };
                return WorkflowRun {
                    status,
                    steps,
                    fallback: Some(fallback),
                };
            }
        }

        if workflow.steps.is_empty() {
            let fallback = self
                .run_fallback(agent, workflow, document, document_type_id, "workflow has no steps")
                .await;
            let status = if fallback.succeeded {
                RunStatus::FellBack
            } else {
                RunStatus::Failed
            };
            return WorkflowRun {
                status,
                steps,
                fallback: Some(fallback),
            };
        }

        WorkflowRun {
            status: RunStatus::Completed,
            steps,
            fallback: None,
        }
    }

    /// Run one step: 1 initial attempt plus `retries` additional ones, each
    /// bounded by the step timeout. A timed-out attempt is abandoned, not
    /// interrupted.
    async fn run_step(&self, agent: &Agent, step: &WorkflowStep, content: &str) -> StepResult {
        let started = Instant::now();
        let max_attempts = step.retries.saturating_add(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            let bound = Duration::from_millis(step.timeout_ms);
            match timeout(bound, self.executor.execute(agent, step.action, content)).await {
                Ok(Ok(output)) => {
                    debug!(action = %step.action, attempt, "Step succeeded");
                    return StepResult {
                        action: step.action,
                        attempts: attempt,
                        succeeded: true,
                        output: Some(output),
                        error: None,
                        duration_ms: elapsed_ms(started),
                    };
                }
                Ok(Err(err)) => {
                    warn!(action = %step.action, attempt, error = %err, "Step attempt failed");
                    last_error = Some(err.to_string());
                }
                Err(_) => {
                    warn!(
                        action = %step.action,
                        attempt,
                        timeout_ms = step.timeout_ms,
                        "Step attempt timed out"
                    );
                    last_error = Some(format!("timed out after {}ms", step.timeout_ms));
                }
            }
        }

        StepResult {
            action: step.action,
            attempts: max_attempts,
            succeeded: false,
            output: None,
            error: last_error,
            duration_ms: elapsed_ms(started),
        }
    }

    /// Run the fallback action once (no retries, no engine timeout) and, if
    /// configured, hand a notice to the notifier. Notifier failures are
    /// logged and never affect the run status.
    async fn run_fallback(
        &self,
        agent: &Agent,
        workflow: &Workflow,
        document: &Document,
        document_type_id: &str,
        reason: &str,
    ) -> FallbackResult {
        let fallback = &workflow.fallback;
        let (succeeded, error) = match self
            .executor
            .execute(agent, fallback.action, &document.content)
            .await
        {
            Ok(_) => (true, None),
            Err(err) => {
                warn!(action = %fallback.action, error = %err, "Fallback action failed");
                (false, Some(err.to_string()))
            }
        };

        let mut notified = false;
        if let Some(recipient) = &fallback.notification {
            notified = true;
            let notice = FallbackNotice {
                recipient: recipient.clone(),
                document_type_id: document_type_id.to_string(),
                document_id: document.id.clone(),
                reason: reason.to_string(),
            };
            if let Err(err) = self.notifier.notify_fallback(notice).await {
                warn!(error = %err, "Fallback notification failed");
            }
        }

        FallbackResult {
            action: fallback.action,
            succeeded,
            error,
            notified,
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
