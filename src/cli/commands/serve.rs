//! Serve command: run the HTTP API server.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::adapters::http::ApiServer;
use crate::cli::context::{load_config, AppContext};

pub async fn execute(port: Option<u16>, config_path: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    let ctx = AppContext::init_with_config(config).await?;
    let server = ApiServer::new(
        Arc::clone(&ctx.service),
        Arc::clone(&ctx.catalog),
        ctx.config.server.clone(),
    );

    server
        .serve_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    Ok(())
}
