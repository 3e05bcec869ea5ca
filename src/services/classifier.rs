//! Keyword-based document-type classification.
//!
//! Pure functions over the document text and an immutable catalog: every
//! type is scored by the total occurrence count of its keywords in the
//! lowercased content, and the single best match wins. No side effects
//! beyond warning logs for malformed keywords.

use regex::RegexBuilder;
use tracing::warn;

use crate::domain::models::{Catalog, DocumentTypeDefinition, DocumentTypeOption};

/// Map free-text document content to the best-matching document type.
///
/// Returns `None` for empty/whitespace-only content, for an empty catalog,
/// or when every type scores zero. Ties on the highest score are broken by
/// catalog declaration order: the first type reaching the top score wins.
pub fn detect_document_type(content: &str, catalog: &Catalog) -> Option<String> {
    if content.trim().is_empty() {
        return None;
    }

    let normalized = content.to_lowercase();

    let mut best: Option<(&DocumentTypeDefinition, usize)> = None;
    for definition in catalog.iter() {
        let score = score_type(&normalized, definition);
        if score == 0 {
            continue;
        }
        let beats_best = best.map_or(true, |(_, best_score)| score > best_score);
        if beats_best {
            best = Some((definition, score));
        }
    }

    best.map(|(definition, _)| definition.id.clone())
}

/// Total occurrence count of the type's keywords in the normalized content.
///
/// A keyword that fails to compile as a pattern is skipped for that keyword
/// only; scoring continues for the rest of the type.
fn score_type(normalized_content: &str, definition: &DocumentTypeDefinition) -> usize {
    let mut score = 0;
    for keyword in &definition.keywords {
        match RegexBuilder::new(keyword).case_insensitive(true).build() {
            Ok(pattern) => score += pattern.find_iter(normalized_content).count(),
            Err(err) => {
                warn!(
                    document_type = %definition.id,
                    keyword = %keyword,
                    error = %err,
                    "Skipping keyword that does not compile as a pattern"
                );
            }
        }
    }
    score
}

/// Project the catalog into UI options, in catalog order.
pub fn list_document_type_options(catalog: &Catalog) -> Vec<DocumentTypeOption> {
    catalog
        .iter()
        .map(|definition| DocumentTypeOption {
            id: definition.id.clone(),
            display_label: definition.display_name.clone(),
            category: definition.category.clone(),
        })
        .collect()
}
