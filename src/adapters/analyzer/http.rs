//! HTTP client for the remote document-analysis service.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use super::error::AnalyzerApiError;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Agent, StepAction};
use crate::domain::ports::AgentExecutor;
use crate::infrastructure::config::AnalyzerConfig;
use crate::infrastructure::retry::RetryPolicy;

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    agent: &'a str,
    action: StepAction,
    content: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    result: Value,
}

/// Agent executor backed by the analyzer HTTP API.
///
/// Transient failures (429, 5xx, timeouts) are retried per the configured
/// policy; client errors fail the attempt immediately.
pub struct HttpAgentExecutor {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    retry: RetryPolicy,
}

impl HttpAgentExecutor {
    pub fn new(config: &AnalyzerConfig) -> Result<Self, AnalyzerApiError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AnalyzerApiError::Network(e.to_string()))?;

        let retry = RetryPolicy::new(
            config.retry.max_attempts,
            Duration::from_millis(config.retry.initial_delay_ms),
            Duration::from_millis(config.retry.max_delay_ms),
            config.retry.factor,
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            retry,
        })
    }

    async fn analyze(
        &self,
        agent_id: &str,
        action: StepAction,
        content: &str,
    ) -> Result<Value, AnalyzerApiError> {
        let url = format!("{}/v1/analyze", self.base_url);
        let body = AnalyzeRequest {
            agent: agent_id,
            action,
            content,
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AnalyzerApiError::from_status(status, text));
        }

        let parsed: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerApiError::InvalidResponse(e.to_string()))?;

        Ok(parsed.result)
    }
}

#[async_trait]
impl AgentExecutor for HttpAgentExecutor {
    #[instrument(skip(self, content), fields(agent_id = %agent.id, action = %action))]
    async fn execute(
        &self,
        agent: &Agent,
        action: StepAction,
        content: &str,
    ) -> DomainResult<Value> {
        debug!("Dispatching action to analyzer");

        self.retry
            .execute(|| self.analyze(&agent.id, action, content))
            .await
            .map_err(|e| DomainError::ExecutionFailed(e.to_string()))
    }
}
