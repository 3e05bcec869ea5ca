//! Agent execution port.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Agent, StepAction};

/// Opaque asynchronous capability that performs a step action against
/// document content on behalf of an agent.
///
/// The workflow engine treats this as a black box: any error is captured as
/// a failed attempt, never propagated. Cancellation is not guaranteed: a
/// timed-out attempt is abandoned by the engine, and the adapter may keep
/// running if it does not itself honor cancellation.
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Perform `action` against `content` and return a structured result.
    async fn execute(
        &self,
        agent: &Agent,
        action: StepAction,
        content: &str,
    ) -> DomainResult<Value>;
}
