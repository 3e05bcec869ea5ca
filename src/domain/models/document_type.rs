//! Document types and the immutable classification catalog.
//!
//! The catalog is loaded once from configuration and shared read-only.
//! Declaration order matters: it is the tie-break when several types reach
//! the same classification score.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review-risk bucket for a document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(anyhow::anyhow!("Unknown risk level: {s}")),
        }
    }
}

/// One catalog entry: a recognizable kind of legal document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTypeDefinition {
    /// Unique type identifier (slug, e.g. "nda").
    pub id: String,

    /// Human-readable name shown in pickers.
    pub display_name: String,

    /// Grouping category (e.g. "Contracts").
    pub category: String,

    pub risk_level: RiskLevel,

    /// Reviewer group that handles fallbacks for this type.
    pub default_reviewer: String,

    /// Keyword signature used by the classifier. May be empty, in which
    /// case the type can never be detected automatically.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// UI projection of a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTypeOption {
    pub id: String,
    pub display_label: String,
    pub category: String,
}

/// The ordered, immutable set of document types.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    types: Vec<DocumentTypeDefinition>,
}

impl Catalog {
    pub fn new(types: Vec<DocumentTypeDefinition>) -> Self {
        Self { types }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&DocumentTypeDefinition> {
        self.types.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &DocumentTypeDefinition> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(id: &str) -> DocumentTypeDefinition {
        DocumentTypeDefinition {
            id: id.to_string(),
            display_name: id.to_uppercase(),
            category: "Contracts".to_string(),
            risk_level: RiskLevel::Low,
            default_reviewer: "contracts-team".to_string(),
            keywords: vec![],
        }
    }

    #[test]
    fn test_risk_level_round_trip() {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            assert_eq!(level.as_str().parse::<RiskLevel>().unwrap(), level);
        }
        assert!("severe".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_catalog_preserves_declaration_order() {
        let catalog = Catalog::new(vec![definition("nda"), definition("lease")]);
        let ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["nda", "lease"]);
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = Catalog::new(vec![definition("nda")]);
        assert!(catalog.contains("nda"));
        assert!(!catalog.contains("deed"));
        assert_eq!(catalog.get("nda").unwrap().display_name, "NDA");
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }
}
