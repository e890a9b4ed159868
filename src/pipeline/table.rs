//! Table rendering: Markdown (GFM) or Jira pipe tables.
//!
//! Both dialects are row-oriented, so every cell is flattened onto one line:
//! NULs are dropped, `|` is escaped and any line break becomes a space.
//! [`escape_cell`] is shared with the outline renderer.

use crate::config::{LineEnding, TableStyle};
use crate::pipeline::parse::ParsedTable;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\n|\r").unwrap());

/// Make `value` safe inside a pipe-table cell.
pub fn escape_cell(value: &str) -> String {
    let value = value.replace('\0', "").replace('|', "\\|");
    RE_LINE_BREAK.replace_all(&value, " ").into_owned()
}

/// Ensure a non-empty preamble is followed by exactly one blank line.
pub fn normalize_preamble(preamble: &str) -> String {
    if preamble.is_empty() {
        return String::new();
    }
    let mut out = preamble.to_string();
    if !out.ends_with('\n') {
        out.push('\n');
    }
    if !out.ends_with("\n\n") {
        out.push('\n');
    }
    out
}

/// Prepend a `#` column numbering rows from 1 in their current order.
pub fn add_line_numbers(table: ParsedTable) -> ParsedTable {
    let mut headers = Vec::with_capacity(table.headers.len() + 1);
    headers.push("#".to_string());
    headers.extend(table.headers);
    let rows = table
        .rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let mut numbered = Vec::with_capacity(row.len() + 1);
            numbered.push((i + 1).to_string());
            numbered.extend(row);
            numbered
        })
        .collect();
    ParsedTable { headers, rows }
}

/// Render `table` in `style`, terminating every line (the last included) with `eol`.
///
/// Data rows keep their own cell count; they are not padded to the header width.
pub fn render(table: &ParsedTable, style: TableStyle, eol: LineEnding) -> String {
    let headers: Vec<String> = table.headers.iter().map(|h| escape_cell(h)).collect();

    let mut lines = Vec::with_capacity(table.rows.len() + 2);
    match style {
        TableStyle::Markdown => {
            lines.push(format!("| {} |", headers.join(" | ")));
            lines.push(format!("|{}|", vec!["---"; headers.len()].join("|")));
        }
        TableStyle::Jira => lines.push(format!("|| {} ||", headers.join(" || "))),
    }
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|c| escape_cell(c)).collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }

    let eol = eol.as_str();
    let mut out = lines.join(eol);
    out.push_str(eol);
    out
}
