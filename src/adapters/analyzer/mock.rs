//! Mock agent executor for testing.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Agent, StepAction};
use crate::domain::ports::AgentExecutor;

/// Scripted behavior for one step action.
#[derive(Debug, Clone)]
pub enum StepBehavior {
    /// Return a canned success payload.
    Succeed,
    /// Return an execution error.
    Fail,
    /// Succeed after the first `failures` calls for this action have failed.
    FailTimes(u32),
    /// Sleep for the given duration before succeeding (for timeout tests).
    Hang(Duration),
}

/// Mock agent executor with per-action scripted behavior.
///
/// Records every invocation so tests can assert attempt counts and ordering.
/// Actions without a configured behavior succeed.
pub struct MockAgentExecutor {
    behaviors: HashMap<StepAction, StepBehavior>,
    calls: Mutex<Vec<StepAction>>,
}

impl MockAgentExecutor {
    pub fn new() -> Self {
        Self {
            behaviors: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_behavior(mut self, action: StepAction, behavior: StepBehavior) -> Self {
        self.behaviors.insert(action, behavior);
        self
    }

    /// Every action invoked so far, in call order.
    pub fn calls(&self) -> Vec<StepAction> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    fn record(&self, action: StepAction) -> usize {
        let mut calls = self.calls.lock().expect("calls lock poisoned");
        calls.push(action);
        calls.iter().filter(|a| **a == action).count()
    }
}

impl Default for MockAgentExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentExecutor for MockAgentExecutor {
    async fn execute(
        &self,
        agent: &Agent,
        action: StepAction,
        _content: &str,
    ) -> DomainResult<Value> {
        let call_number = self.record(action);

        match self.behaviors.get(&action) {
            Some(StepBehavior::Fail) => Err(DomainError::ExecutionFailed(format!(
                "mock failure for {action}"
            ))),
            Some(StepBehavior::FailTimes(failures)) if call_number <= *failures as usize => {
                Err(DomainError::ExecutionFailed(format!(
                    "mock transient failure {call_number} for {action}"
                )))
            }
            Some(StepBehavior::Hang(duration)) => {
                tokio::time::sleep(*duration).await;
                Ok(json!({ "action": action.as_str(), "agent": agent.id }))
            }
            _ => Ok(json!({ "action": action.as_str(), "agent": agent.id })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fail_times_recovers() {
        let executor =
            MockAgentExecutor::new().with_behavior(StepAction::Summarize, StepBehavior::FailTimes(2));
        let agent = Agent::new("agent-1", "Test", [StepAction::Summarize]);

        assert!(executor
            .execute(&agent, StepAction::Summarize, "text")
            .await
            .is_err());
        assert!(executor
            .execute(&agent, StepAction::Summarize, "text")
            .await
            .is_err());
        assert!(executor
            .execute(&agent, StepAction::Summarize, "text")
            .await
            .is_ok());
        assert_eq!(executor.calls().len(), 3);
    }
}
