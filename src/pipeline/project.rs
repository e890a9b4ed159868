//! Column projection: keep and reorder columns by 1-based position.

use crate::pipeline::parse::ParsedTable;
use tracing::debug;

/// Parse a position list such as `"3, 1,x,2"` into `[3, 1, 2]`.
///
/// Tokens that are not plain decimal numbers are dropped. Returns `None`
/// when nothing usable remains.
pub fn parse_positions(positions: &str) -> Option<Vec<usize>> {
    let out: Vec<usize> = positions
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|p| p.parse().ok())
        .collect();
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Re-project `table` to the given 1-based positions.
///
/// Positions outside `1..=headers.len()` are ignored; if none survive the
/// table is returned unchanged. Duplicates are honoured. Short rows are
/// padded with empty strings for the selected indices.
pub fn project(table: ParsedTable, positions: &[usize]) -> ParsedTable {
    let width = table.headers.len();
    let idxs: Vec<usize> = positions
        .iter()
        .filter(|&&p| p >= 1 && p <= width)
        .map(|p| p - 1)
        .collect();
    if idxs.is_empty() {
        debug!("No valid column positions; keeping all {} columns", width);
        return table;
    }
    debug!("Projecting columns {:?}", positions);

    let headers = idxs.iter().map(|&i| table.headers[i].clone()).collect();
    let rows = table
        .rows
        .iter()
        .map(|row| {
            idxs.iter()
                .map(|&i| row.get(i).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    ParsedTable { headers, rows }
}
