//! Domain errors for the docflow system.

use thiserror::Error;

/// Domain-level errors that can occur in the docflow system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No agent assigned for document type: {0}")]
    NotAssigned(String),

    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Notification failed: {0}")]
    NotificationFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
