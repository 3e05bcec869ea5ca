//! SQLite implementation of the AgentRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Agent;
use crate::domain::ports::AgentRepository;

#[derive(Clone)]
pub struct SqliteAgentRepository {
    pool: SqlitePool,
}

impl SqliteAgentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgentRepository for SqliteAgentRepository {
    async fn get(&self, id: &str) -> DomainResult<Option<Agent>> {
        let row: Option<AgentRow> = sqlx::query_as(
            "SELECT id, name, description, capabilities, created_at, updated_at
             FROM agents WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(AgentRow::try_into_agent).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<Agent>> {
        let rows: Vec<AgentRow> = sqlx::query_as(
            "SELECT id, name, description, capabilities, created_at, updated_at
             FROM agents ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AgentRow::try_into_agent).collect()
    }

    async fn insert(&self, agent: &Agent) -> DomainResult<()> {
        let capabilities_json = serde_json::to_string(&agent.capabilities)?;

        sqlx::query(
            "INSERT INTO agents (id, name, description, capabilities, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&agent.id)
        .bind(&agent.name)
        .bind(&agent.description)
        .bind(&capabilities_json)
        .bind(agent.created_at.to_rfc3339())
        .bind(agent.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM agents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AgentNotFound(id.to_string()));
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct AgentRow {
    id: String,
    name: String,
    description: Option<String>,
    capabilities: String,
    created_at: String,
    updated_at: String,
}

impl AgentRow {
    fn try_into_agent(self) -> DomainResult<Agent> {
        use crate::adapters::sqlite::{parse_datetime, parse_json};

        Ok(Agent {
            id: self.id,
            name: self.name,
            description: self.description,
            capabilities: parse_json(&self.capabilities)?,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}
