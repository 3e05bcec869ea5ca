//! Agent repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Agent;

/// Repository interface for agent persistence.
///
/// Agents are created and edited by an external admin workflow; the core
/// only reads them. Insert/delete exist for admin tooling and tests.
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Get an agent by id.
    async fn get(&self, id: &str) -> DomainResult<Option<Agent>>;

    /// List all agents.
    async fn list(&self) -> DomainResult<Vec<Agent>>;

    /// Insert a new agent.
    async fn insert(&self, agent: &Agent) -> DomainResult<()>;

    /// Delete an agent. Assignments bound to it are removed with it.
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
