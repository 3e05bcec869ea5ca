//! Cached wrapper for AssignmentRepository using a moka TTL cache.
//!
//! Caches per-type lookups since assignments change rarely relative to how
//! often the classification pipeline reads them. Every write invalidates the
//! affected entry so a read after `assign`/`unassign` never serves stale
//! data.

use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::errors::DomainResult;
use crate::domain::models::AgentAssignment;
use crate::domain::ports::AssignmentRepository;

/// Default TTL for cached assignments.
const ASSIGNMENT_CACHE_TTL_SECS: u64 = 60;

/// Maximum number of cached entries.
const ASSIGNMENT_CACHE_MAX_CAPACITY: u64 = 1000;

/// Cached assignment repository decorator.
pub struct CachedAssignmentRepository<R: AssignmentRepository> {
    inner: Arc<R>,
    /// Cache keyed by document-type id. `None` entries are not cached so a
    /// later assign is visible immediately even across instances.
    by_type: Cache<String, Arc<AgentAssignment>>,
}

impl<R: AssignmentRepository> CachedAssignmentRepository<R> {
    /// Create a new cached assignment repository with the default TTL.
    pub fn new(inner: Arc<R>) -> Self {
        Self::with_ttl(inner, Duration::from_secs(ASSIGNMENT_CACHE_TTL_SECS))
    }

    /// Create with a custom TTL.
    pub fn with_ttl(inner: Arc<R>, ttl: Duration) -> Self {
        let by_type = Cache::builder()
            .max_capacity(ASSIGNMENT_CACHE_MAX_CAPACITY)
            .time_to_live(ttl)
            .build();

        Self { inner, by_type }
    }

    async fn invalidate(&self, document_type_id: &str) {
        self.by_type.invalidate(document_type_id).await;
    }
}

#[async_trait]
impl<R: AssignmentRepository + 'static> AssignmentRepository for CachedAssignmentRepository<R> {
    async fn list(&self) -> DomainResult<Vec<AgentAssignment>> {
        // Listing always goes to the source of truth.
        self.inner.list().await
    }

    async fn get(&self, document_type_id: &str) -> DomainResult<Option<AgentAssignment>> {
        if let Some(cached) = self.by_type.get(document_type_id).await {
            return Ok(Some((*cached).clone()));
        }

        let result = self.inner.get(document_type_id).await?;
        if let Some(ref assignment) = result {
            self.by_type
                .insert(document_type_id.to_string(), Arc::new(assignment.clone()))
                .await;
        }
        Ok(result)
    }

    async fn upsert(&self, assignment: &AgentAssignment) -> DomainResult<()> {
        let result = self.inner.upsert(assignment).await;
        if result.is_ok() {
            self.invalidate(&assignment.document_type_id).await;
        }
        result
    }

    async fn delete(&self, document_type_id: &str) -> DomainResult<()> {
        let result = self.inner.delete(document_type_id).await;
        if result.is_ok() {
            self.invalidate(document_type_id).await;
        }
        result
    }
}
