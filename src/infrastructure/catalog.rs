//! Document-type catalog loading.
//!
//! The catalog is a YAML file mapping document-type ids to their metadata
//! and keyword signatures. Loading returns a typed error so the composition
//! root can distinguish "no data" from "failed to load"; it is the single
//! place that degrades a failure to an empty catalog.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::models::{Catalog, DocumentTypeDefinition};

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    document_types: Vec<DocumentTypeDefinition>,
}

/// Loads the document-type catalog from YAML configuration.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Read and parse the catalog, preserving declaration order.
    pub fn load(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let file: CatalogFile =
            serde_yaml::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        Ok(Catalog::new(file.document_types))
    }

    /// Load the catalog, substituting an empty one on failure.
    ///
    /// Classification degrades to "no match" with an empty catalog; it never
    /// prevents the service from starting.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Catalog {
        match Self::load(&path) {
            Ok(catalog) => {
                info!(
                    path = %path.as_ref().display(),
                    types = catalog.len(),
                    "Loaded document-type catalog"
                );
                catalog
            }
            Err(err) => {
                warn!(error = %err, "Falling back to an empty document-type catalog");
                Catalog::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_catalog() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(
            file,
            concat!(
                "document_types:\n",
                "  - id: nda\n",
                "    display_name: Non-Disclosure Agreement\n",
                "    category: Contracts\n",
                "    risk_level: medium\n",
                "    default_reviewer: contracts-team\n",
                "    keywords: [non-disclosure, confidential, nda]\n",
                "  - id: lease\n",
                "    display_name: Lease Agreement\n",
                "    category: Real Estate\n",
                "    risk_level: low\n",
                "    default_reviewer: real-estate-team\n",
            )
        )
        .unwrap();

        let catalog = CatalogLoader::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("nda").unwrap().keywords.len(), 3);
        // Missing keyword list defaults to empty
        assert!(catalog.get("lease").unwrap().keywords.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CatalogLoader::load("/nonexistent/catalog.yaml").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "document_types: {{not valid").unwrap();

        let err = CatalogLoader::load(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_load_or_empty_degrades_gracefully() {
        let catalog = CatalogLoader::load_or_empty("/nonexistent/catalog.yaml");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_shipped_default_catalog_parses() {
        let catalog = CatalogLoader::load(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/config/document_types.yaml"
        ))
        .unwrap();
        assert!(catalog.contains("nda"));
        assert!(!catalog.get("nda").unwrap().keywords.is_empty());
    }
}
