//! Classify command: map a document file to a catalog type.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::context::load_config;
use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::catalog::CatalogLoader;
use crate::services::classifier;

#[derive(Debug, serde::Serialize)]
pub struct ClassifyOutput {
    pub file: String,
    pub document_type_id: Option<String>,
    pub display_name: Option<String>,
}

impl CommandOutput for ClassifyOutput {
    fn to_human(&self) -> String {
        match (&self.document_type_id, &self.display_name) {
            (Some(id), Some(name)) => format!("{id} ({name})"),
            (Some(id), None) => id.clone(),
            _ => "No matching document type.".to_string(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(file: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let catalog = CatalogLoader::load_or_empty(&config.catalog.path);

    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let document_type_id = classifier::detect_document_type(&content, &catalog);
    let display_name = document_type_id
        .as_deref()
        .and_then(|id| catalog.get(id))
        .map(|d| d.display_name.clone());

    output(
        &ClassifyOutput {
            file: file.display().to_string(),
            document_type_id,
            display_name,
        },
        json,
    );
    Ok(())
}
