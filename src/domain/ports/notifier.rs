//! Fallback notification port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainResult;

/// Notice emitted when a workflow falls back and a notification recipient is
/// configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackNotice {
    pub recipient: String,
    pub document_type_id: String,
    pub document_id: String,
    pub reason: String,
}

/// Downstream alerting collaborator.
///
/// Fire-and-forget from the workflow engine's perspective: a notifier
/// failure is logged and never affects the reported workflow status.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_fallback(&self, notice: FallbackNotice) -> DomainResult<()>;
}
