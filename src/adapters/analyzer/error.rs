//! Analyzer API error taxonomy.

use reqwest::StatusCode;
use thiserror::Error;

use crate::infrastructure::retry::RetryableError;

/// Errors from the remote document-analysis service.
///
/// Transient errors (429, 5xx, timeouts, network failures) are worth
/// retrying; client errors are not.
#[derive(Debug, Clone, Error)]
pub enum AnalyzerApiError {
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Server error {0}: {1}")]
    ServerError(StatusCode, String),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unauthorized: check the analyzer API key")]
    Unauthorized,

    #[error("Analyzer endpoint not found")]
    NotFound,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl AnalyzerApiError {
    /// Whether a retry may help.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded | Self::ServerError(_, _) | Self::Timeout | Self::Network(_)
        )
    }

    /// Classify an HTTP error status.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized,
            StatusCode::NOT_FOUND => Self::NotFound,
            s if s.is_server_error() => Self::ServerError(s, body),
            _ => Self::InvalidRequest(body),
        }
    }
}

impl RetryableError for AnalyzerApiError {
    fn is_retryable(&self) -> bool {
        self.is_transient()
    }
}

impl From<reqwest::Error> for AnalyzerApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(AnalyzerApiError::RateLimitExceeded.is_transient());
        assert!(AnalyzerApiError::Timeout.is_transient());
        assert!(
            AnalyzerApiError::ServerError(StatusCode::SERVICE_UNAVAILABLE, String::new())
                .is_transient()
        );
        assert!(!AnalyzerApiError::Unauthorized.is_transient());
        assert!(!AnalyzerApiError::InvalidRequest("bad".to_string()).is_transient());
        assert!(!AnalyzerApiError::NotFound.is_transient());
    }

    #[test]
    fn test_from_status() {
        assert!(matches!(
            AnalyzerApiError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            AnalyzerApiError::RateLimitExceeded
        ));
        assert!(matches!(
            AnalyzerApiError::from_status(StatusCode::BAD_GATEWAY, String::new()),
            AnalyzerApiError::ServerError(_, _)
        ));
        assert!(matches!(
            AnalyzerApiError::from_status(StatusCode::BAD_REQUEST, String::new()),
            AnalyzerApiError::InvalidRequest(_)
        ));
    }
}
