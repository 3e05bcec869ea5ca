//! Typed application configuration.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};

use serde::{Deserialize, Serialize};

/// Top-level configuration for the docflow service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub analyzer: AnalyzerConfig,
    pub logging: LoggingConfig,
}

/// SQLite database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL, e.g. `sqlite:.docflow/docflow.db`.
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:.docflow/docflow.db".to_string(),
            max_connections: 5,
        }
    }
}

/// HTTP API server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8090,
            enable_cors: true,
        }
    }
}

/// Document-type catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the YAML catalog file.
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "config/document_types.yaml".to_string(),
        }
    }
}

/// Remote analyzer (agent-execution collaborator) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub base_url: String,
    /// Optional bearer token for the analyzer API.
    pub api_key: Option<String>,
    /// Client-side request timeout in milliseconds.
    pub timeout_ms: u64,
    pub retry: RetryConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8091".to_string(),
            api_key: None,
            timeout_ms: 30_000,
            retry: RetryConfig::default(),
        }
    }
}

/// Retry settings for network-facing operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 10_000,
            factor: 2.0,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of: trace, debug, info, warn, error.
    pub level: String,
    /// One of: json, pretty.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
