//! Uploaded documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored document with its extracted text.
///
/// Documents arrive through an external upload pipeline; the core reads them
/// for classification and assignment test runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier (e.g. "doc-42").
    pub id: String,

    /// Original file name.
    pub file_name: String,

    /// Extracted text content.
    pub content: String,

    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            content: content.into(),
            uploaded_at: Utc::now(),
        }
    }
}
