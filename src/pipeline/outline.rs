//! Outline rendering: one heading plus a bullet list per record.
//!
//! NotebookLM and similar assistants read long prose far better than wide
//! tables, so the "notebook" format turns each row into a small section:
//!
//! ```text
//! ### seo tools
//! - **Volume**: 1200
//! - **Current URL**: <https://example.org/seo>
//! ```
//!
//! The heading comes from the `Keyword` column (first column if there is
//! none). [`Detail::Full`] lists every other non-empty column;
//! [`Detail::Minimal`] lists the curated subset chosen by
//! [`crate::fields::select_fields`].

use crate::config::Detail;
use crate::fields::{find_header, select_fields};
use crate::pipeline::parse::ParsedTable;
use crate::pipeline::table::escape_cell;

/// Header whose value becomes the record heading.
const HEADING_FIELD: &str = "keyword";

/// Render `table` as an outline. `allowlist` is consulted in minimal mode only.
pub fn render(table: &ParsedTable, detail: Detail, allowlist: &[&str]) -> String {
    let headers = &table.headers;
    let heading_idx = find_header(headers, HEADING_FIELD).unwrap_or(0);
    let fields: Vec<usize> = match detail {
        Detail::Full => (0..headers.len()).collect(),
        Detail::Minimal => select_fields(headers, allowlist, heading_idx),
    };

    let mut out: Vec<String> = vec![
        "## Export (NotebookLM)\n".to_string(),
        format!("- **Rows**: {}", table.rows.len()),
        format!("- **Mode**: {}", detail.as_str()),
        String::new(),
        "## Records\n".to_string(),
    ];

    for (i, row) in table.rows.iter().enumerate() {
        let heading = escape_cell(cell(row, heading_idx, headers.len()));
        let heading = heading.trim();
        if heading.is_empty() {
            out.push(format!("### Row {}", i + 1));
        } else {
            out.push(format!("### {heading}"));
        }

        for &idx in fields.iter().filter(|&&idx| idx != heading_idx) {
            let value = escape_cell(cell(row, idx, headers.len()));
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            if is_absolute_url(value) {
                out.push(format!("- **{}**: <{}>", headers[idx], value));
            } else {
                out.push(format!("- **{}**: {}", headers[idx], value));
            }
        }
        out.push(String::new());
    }

    format!("{}\n", out.join("\n").trim_end())
}

/// Cell `idx` of `row`, or `""` when the row is short or `idx` is past the header width.
fn cell(row: &[String], idx: usize, width: usize) -> &str {
    if idx >= width {
        return "";
    }
    row.get(idx).map(String::as_str).unwrap_or("")
}

fn is_absolute_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::NOTEBOOK_MIN_FIELDS;

    fn table(headers: &[&str], rows: &[&[&str]]) -> ParsedTable {
        ParsedTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn full_detail_document() {
        let t = table(&["Keyword", "Volume"], &[&["seo tools", "1200"]]);
        let doc = render(&t, Detail::Full, NOTEBOOK_MIN_FIELDS);
        assert_eq!(
            doc,
            "## Export (NotebookLM)\n\n- **Rows**: 1\n- **Mode**: full\n\n## Records\n\n\
             ### seo tools\n- **Volume**: 1200\n"
        );
    }

    #[test]
    fn empty_heading_becomes_row_number() {
        let t = table(&["Keyword", "Volume"], &[&["a", "1"], &["  ", "2"]]);
        let doc = render(&t, Detail::Full, NOTEBOOK_MIN_FIELDS);
        assert!(doc.contains("### Row 2\n- **Volume**: 2"));
    }

    #[test]
    fn heading_defaults_to_first_column() {
        let t = table(&["Name", "Note"], &[&["alpha", "x"]]);
        let doc = render(&t, Detail::Full, NOTEBOOK_MIN_FIELDS);
        assert!(doc.contains("### alpha\n- **Note**: x"));
        assert!(!doc.contains("**Name**"));
    }

    #[test]
    fn empty_values_are_skipped_and_urls_wrapped() {
        let t = table(
            &["Keyword", "Volume", "Current URL"],
            &[&["rust", " ", "https://www.rust-lang.org/"]],
        );
        let doc = render(&t, Detail::Full, NOTEBOOK_MIN_FIELDS);
        assert!(!doc.contains("**Volume**"));
        assert!(doc.contains("- **Current URL**: <https://www.rust-lang.org/>"));
    }

    #[test]
    fn minimal_detail_uses_curated_fields() {
        let t = table(
            &["Keyword", "Noise", "Volume", "KD"],
            &[&["seo", "zzz", "100", "12"]],
        );
        let doc = render(&t, Detail::Minimal, NOTEBOOK_MIN_FIELDS);
        assert!(doc.contains("- **Mode**: minimal"));
        assert!(doc.contains("### seo\n- **Volume**: 100\n- **KD**: 12"));
        assert!(!doc.contains("Noise"));
    }

    #[test]
    fn minimal_detail_falls_back_for_unknown_schema() {
        let t = table(&["City", "Population"], &[&["Brno", "380000"]]);
        let doc = render(&t, Detail::Minimal, NOTEBOOK_MIN_FIELDS);
        assert!(doc.contains("### Brno\n- **Population**: 380000"));
    }

    #[test]
    fn cells_are_flattened_and_escaped() {
        let t = table(&["Keyword", "Note"], &[&["a|b", "line1\nline2"]]);
        let doc = render(&t, Detail::Full, NOTEBOOK_MIN_FIELDS);
        assert!(doc.contains("### a\\|b"));
        assert!(doc.contains("- **Note**: line1 line2"));
    }

    #[test]
    fn empty_table_still_has_preamble_and_single_trailing_newline() {
        let doc = render(&ParsedTable::default(), Detail::Minimal, NOTEBOOK_MIN_FIELDS);
        assert_eq!(
            doc,
            "## Export (NotebookLM)\n\n- **Rows**: 0\n- **Mode**: minimal\n\n## Records\n"
        );
    }
}
