//! Tracing subscriber setup driven by configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::infrastructure::config::LoggingConfig;

/// Resolve the filter directives for the subscriber. An explicit
/// `RUST_LOG` always wins over the configured level.
pub fn filter_directives(env_override: Option<String>, logging: &LoggingConfig) -> String {
    env_override
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| logging.level.clone())
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays machine-readable.
pub fn init(logging: &LoggingConfig) {
    let directives = filter_directives(std::env::var("RUST_LOG").ok(), logging);
    let filter = EnvFilter::new(directives);
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_wins() {
        let logging = LoggingConfig {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        };
        assert_eq!(
            filter_directives(Some("debug,sqlx=warn".to_string()), &logging),
            "debug,sqlx=warn"
        );
    }

    #[test]
    fn test_configured_level_is_fallback() {
        let logging = LoggingConfig {
            level: "warn".to_string(),
            format: "json".to_string(),
        };
        assert_eq!(filter_directives(None, &logging), "warn");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let logging = LoggingConfig::default();
        assert_eq!(filter_directives(Some("  ".to_string()), &logging), "info");
    }
}
