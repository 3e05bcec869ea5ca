//! SQLite database adapters for the docflow system.

pub mod agent_repository;
pub mod assignment_repository;
pub mod connection;
pub mod document_repository;
pub mod migrations;

pub use agent_repository::SqliteAgentRepository;
pub use assignment_repository::SqliteAssignmentRepository;
pub use connection::{create_pool, create_test_pool, ConnectionError};
pub use document_repository::SqliteDocumentRepository;
pub use migrations::{run_migrations, Migration, MigrationError, MIGRATIONS};

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};

/// Parse an RFC3339 datetime string from a SQLite row field.
pub fn parse_datetime(s: &str) -> DomainResult<DateTime<Utc>> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| DomainError::SerializationError(e.to_string()))
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a JSON string from a SQLite row field.
pub fn parse_json<T: serde::de::DeserializeOwned>(s: &str) -> DomainResult<T> {
    serde_json::from_str(s).map_err(|e| DomainError::SerializationError(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),
}

/// Create a pool against `database_url` with all migrations applied.
pub async fn initialize_database(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, DatabaseError> {
    let pool = create_pool(database_url, max_connections).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Create an in-memory test pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
