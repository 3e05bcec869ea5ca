//! Table builder wrapper around comfy-table for consistent list display.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};

/// Create a standard list table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Render the table to string with a count header.
pub fn render_list(entity_name: &str, table: &Table, total: usize) -> String {
    if total == 0 {
        return format!("No {entity_name}s found.");
    }
    let noun = if total == 1 {
        entity_name.to_string()
    } else {
        format!("{entity_name}s")
    };
    format!("{total} {noun}:\n{table}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_renders_placeholder() {
        let table = list_table(&["id"]);
        assert_eq!(render_list("agent", &table, 0), "No agents found.");
    }

    #[test]
    fn test_count_header_pluralizes() {
        let mut table = list_table(&["id"]);
        table.add_row(vec!["a"]);
        table.add_row(vec!["b"]);
        let rendered = render_list("agent", &table, 2);
        assert!(rendered.starts_with("2 agents:"));
    }
}
