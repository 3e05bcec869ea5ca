//! Types command: show the configured document-type catalog.

use anyhow::Result;
use std::path::Path;

use crate::cli::context::load_config;
use crate::cli::output::{output, truncate, CommandOutput};
use crate::cli::table::{list_table, render_list};
use crate::infrastructure::catalog::CatalogLoader;

#[derive(Debug, serde::Serialize)]
pub struct TypeInfo {
    pub id: String,
    pub display_name: String,
    pub category: String,
    pub risk_level: String,
    pub default_reviewer: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct TypesOutput {
    pub types: Vec<TypeInfo>,
    pub total: usize,
}

impl CommandOutput for TypesOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "name", "category", "risk", "keywords"]);
        for t in &self.types {
            table.add_row(vec![
                t.id.clone(),
                truncate(&t.display_name, 30),
                t.category.clone(),
                t.risk_level.clone(),
                truncate(&t.keywords.join(", "), 40),
            ]);
        }
        render_list("document type", &table, self.total)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let catalog = CatalogLoader::load_or_empty(&config.catalog.path);

    let types: Vec<TypeInfo> = catalog
        .iter()
        .map(|d| TypeInfo {
            id: d.id.clone(),
            display_name: d.display_name.clone(),
            category: d.category.clone(),
            risk_level: d.risk_level.to_string(),
            default_reviewer: d.default_reviewer.clone(),
            keywords: d.keywords.clone(),
        })
        .collect();

    let total = types.len();
    output(&TypesOutput { types, total }, json);
    Ok(())
}
