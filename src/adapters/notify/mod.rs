//! Notification adapters.
//!
//! The production notifier emits a structured warning for downstream
//! alerting to pick up; `RecordingNotifier` supports tests.

use async_trait::async_trait;
use std::sync::Mutex;
use tracing::warn;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{FallbackNotice, Notifier};

/// Notifier that logs fallback notices via `tracing`.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_fallback(&self, notice: FallbackNotice) -> DomainResult<()> {
        warn!(
            recipient = %notice.recipient,
            document_type_id = %notice.document_type_id,
            document_id = %notice.document_id,
            reason = %notice.reason,
            "Workflow fell back"
        );
        Ok(())
    }
}

/// Notifier that records notices for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<FallbackNotice>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose delivery always fails.
    pub fn failing() -> Self {
        Self {
            notices: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn notices(&self) -> Vec<FallbackNotice> {
        self.notices.lock().expect("notices lock poisoned").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_fallback(&self, notice: FallbackNotice) -> DomainResult<()> {
        self.notices
            .lock()
            .expect("notices lock poisoned")
            .push(notice);
        if self.fail {
            return Err(DomainError::NotificationFailed(
                "recording notifier configured to fail".to_string(),
            ));
        }
        Ok(())
    }
}
