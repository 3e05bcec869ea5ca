//! Document repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Document;

/// Repository interface for stored documents.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Get a document by id.
    async fn get(&self, id: &str) -> DomainResult<Option<Document>>;

    /// List all documents.
    async fn list(&self) -> DomainResult<Vec<Document>>;

    /// Insert a new document.
    async fn insert(&self, document: &Document) -> DomainResult<()>;
}
