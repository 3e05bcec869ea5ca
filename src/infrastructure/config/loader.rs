//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use super::Config;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Database URL cannot be empty")]
    EmptyDatabaseUrl,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid max_attempts: {0}. Cannot be 0")]
    InvalidMaxAttempts(u32),

    #[error(
        "Invalid backoff configuration: initial_delay_ms ({0}) must be <= max_delay_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Invalid retry factor: {0}. Must be at least 1.0")]
    InvalidRetryFactor(f64),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `.docflow/config.yaml` (project config)
    /// 3. `.docflow/local.yaml` (local overrides, optional)
    /// 4. Environment variables (`DOCFLOW_*` prefix)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".docflow/config.yaml"))
            .merge(Yaml::file(".docflow/local.yaml"))
            .merge(Env::prefixed("DOCFLOW_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.database.url.is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }
        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let retry = &config.analyzer.retry;
        if retry.max_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts(retry.max_attempts));
        }
        if retry.initial_delay_ms > retry.max_delay_ms {
            return Err(ConfigError::InvalidBackoff(
                retry.initial_delay_ms,
                retry.max_delay_ms,
            ));
        }
        if retry.factor < 1.0 {
            return Err(ConfigError::InvalidRetryFactor(retry.factor));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_invalid_backoff_rejected() {
        let mut config = Config::default();
        config.analyzer.retry.initial_delay_ms = 60_000;
        config.analyzer.retry.max_delay_ms = 1000;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBackoff(_, _))
        ));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(
            file,
            "server:\n  port: 9999\nanalyzer:\n  base_url: http://analyzer.internal"
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.analyzer.base_url, "http://analyzer.internal");
        // Untouched values keep their defaults
        assert_eq!(config.database.max_connections, 5);
    }
}
