//! Infrastructure: configuration, catalog loading, logging, and generic
//! retry.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod retry;

pub use catalog::{CatalogError, CatalogLoader};
pub use config::{Config, ConfigError, ConfigLoader};
pub use retry::{RetryPolicy, RetryableError};
