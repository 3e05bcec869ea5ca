//! Shared bootstrap for CLI commands.
//!
//! Wires the SQLite repositories, the analyzer client, and the workflow
//! engine into an `AssignmentService` from loaded configuration.

use anyhow::{Context as _, Result};
use std::path::Path;
use std::sync::Arc;

use crate::adapters::analyzer::HttpAgentExecutor;
use crate::adapters::cache::CachedAssignmentRepository;
use crate::adapters::notify::LogNotifier;
use crate::adapters::sqlite::{
    initialize_database, SqliteAgentRepository, SqliteAssignmentRepository,
    SqliteDocumentRepository,
};
use crate::domain::models::Catalog;
use crate::infrastructure::catalog::CatalogLoader;
use crate::infrastructure::config::{Config, ConfigLoader};
use crate::services::{AssignmentService, WorkflowEngine};

pub struct AppContext {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub agents: Arc<SqliteAgentRepository>,
    pub documents: Arc<SqliteDocumentRepository>,
    pub service: Arc<AssignmentService>,
}

impl AppContext {
    /// Load configuration and build the full service stack.
    pub async fn init(config_path: Option<&Path>) -> Result<Self> {
        let config = load_config(config_path)?;
        Self::init_with_config(config).await
    }

    /// Build the service stack from an already-loaded configuration.
    pub async fn init_with_config(config: Config) -> Result<Self> {
        let pool = initialize_database(&config.database.url, config.database.max_connections)
            .await
            .context("Failed to initialize database")?;

        let catalog = Arc::new(CatalogLoader::load_or_empty(&config.catalog.path));

        let assignments = Arc::new(CachedAssignmentRepository::new(Arc::new(
            SqliteAssignmentRepository::new(pool.clone()),
        )));
        let agents = Arc::new(SqliteAgentRepository::new(pool.clone()));
        let documents = Arc::new(SqliteDocumentRepository::new(pool));

        let executor = Arc::new(
            HttpAgentExecutor::new(&config.analyzer)
                .context("Failed to construct analyzer client")?,
        );
        let engine = WorkflowEngine::new(executor, Arc::new(LogNotifier::new()));

        let service = Arc::new(AssignmentService::new(
            assignments,
            agents.clone(),
            documents.clone(),
            engine,
        ));

        Ok(Self {
            config,
            catalog,
            agents,
            documents,
            service,
        })
    }
}

/// Load configuration from an explicit file or the default hierarchy.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}
