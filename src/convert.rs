//! Conversion entry points.
//!
//! The core exposes four things to a serving layer:
//!
//! * [`decode`] — bytes to text
//! * [`render_table`] — text to a Markdown or Jira table
//! * [`render_outline`] — text to the NotebookLM outline
//! * [`crate::fields::NOTEBOOK_MIN_FIELDS`] — the curated minimal field list
//!
//! plus [`convert_bytes`], which chains decoding and rendering from a single
//! [`ConversionConfig`] and reports [`ConversionStats`].
//!
//! Every call is a pure function of its arguments. Nothing is cached or
//! shared between calls, so concurrent conversions need no coordination.

use crate::config::{
    ConversionConfig, Detail, Encoding, LineEnding, OutputFormat, ParseOptions, SortKey,
    TableStyle,
};
use crate::error::Csv2MdError;
use crate::fields::NOTEBOOK_MIN_FIELDS;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::parse::{parse_with_report, ParseReport, ParsedTable};
use crate::pipeline::{decode as decoder, outline, project, sort, table};
use std::time::Instant;
use tracing::{debug, info};

/// Decode raw upload bytes. Never fails for [`Encoding::Auto`].
///
/// # Errors
/// [`Csv2MdError::DecodeFailed`] when an explicit encoding does not match the
/// bytes, [`Csv2MdError::UnsupportedEncoding`] for an unknown codec label.
pub fn decode(raw: &[u8], encoding: &Encoding) -> Result<String, Csv2MdError> {
    decoder::decode(raw, encoding)
}

/// Parse, project, sort and render `text` as a table.
///
/// Line numbers are added after projection and sorting, so they reflect the
/// final row order.
///
/// # Example
/// ```rust
/// use edgequake_csv2md::{render_table, LineEnding, ParseOptions, TableStyle};
///
/// let md = render_table(
///     "A;B;C\n1;2;3\n",
///     &ParseOptions::default(),
///     Some("2,1"),
///     false,
///     None,
///     LineEnding::Lf,
///     TableStyle::Markdown,
/// )
/// .unwrap();
/// assert_eq!(md, "| B | A |\n|---|---|\n| 2 | 1 |\n");
/// ```
pub fn render_table(
    text: &str,
    parse: &ParseOptions,
    positions: Option<&str>,
    add_line_numbers: bool,
    sort: Option<&SortKey>,
    eol: LineEnding,
    style: TableStyle,
) -> Result<String, Csv2MdError> {
    let report = prepare(text, parse, positions, sort)?;
    Ok(finish_table(report.table, add_line_numbers, eol, style))
}

/// Parse, project, sort and render `text` as a NotebookLM outline.
pub fn render_outline(
    text: &str,
    detail: Detail,
    parse: &ParseOptions,
    positions: Option<&str>,
    sort: Option<&SortKey>,
) -> Result<String, Csv2MdError> {
    let report = prepare(text, parse, positions, sort)?;
    Ok(outline::render(&report.table, detail, NOTEBOOK_MIN_FIELDS))
}

/// Decode `raw` and render it according to `config`.
///
/// # Errors
/// Decode errors for explicit encodings, [`Csv2MdError::InvalidConfig`] for
/// a non-ASCII delimiter or quote, and [`Csv2MdError::MalformedCsv`] if every
/// parse tier fails.
pub fn convert_bytes(
    raw: &[u8],
    config: &ConversionConfig,
) -> Result<ConversionOutput, Csv2MdError> {
    let start = Instant::now();
    info!(
        "Starting conversion: {} bytes, encoding {}, format {:?}",
        raw.len(),
        config.encoding.as_str(),
        config.format
    );

    // ── Step 1: Decode ───────────────────────────────────────────────────
    let text = decoder::decode(raw, &config.encoding)?;

    // ── Step 2: Parse, project, sort ─────────────────────────────────────
    let report = prepare(
        &text,
        &config.parse,
        config.positions.as_deref(),
        config.sort.as_ref(),
    )?;
    let rows = report.table.rows.len();
    let columns = report.table.headers.len();
    let strategy = report.strategy;
    let delimiter = report.dialect.delimiter as char;

    // ── Step 3: Render ───────────────────────────────────────────────────
    let body = match config.format {
        OutputFormat::Table => {
            finish_table(report.table, config.line_numbers, config.eol, TableStyle::Markdown)
        }
        OutputFormat::Jira => {
            finish_table(report.table, config.line_numbers, config.eol, TableStyle::Jira)
        }
        OutputFormat::Notebook => {
            let mut t = report.table;
            if let Some(max) = config.max_rows {
                t.rows.truncate(max);
            }
            outline::render(&t, config.detail, NOTEBOOK_MIN_FIELDS)
        }
    };

    let mut document = table::normalize_preamble(&config.preamble);
    document.push_str(&body);

    let stats = ConversionStats {
        rows,
        columns,
        parse_strategy: strategy.name().to_string(),
        delimiter,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Conversion complete: {} rows x {} columns via {} parser, {}ms",
        rows, columns, stats.parse_strategy, stats.duration_ms
    );

    Ok(ConversionOutput {
        text: document,
        stats,
    })
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Parse, then apply the optional projection and sort.
fn prepare(
    text: &str,
    parse: &ParseOptions,
    positions: Option<&str>,
    sort: Option<&SortKey>,
) -> Result<ParseReport, Csv2MdError> {
    let mut report = parse_with_report(text, parse)?;

    if let Some(positions) = positions.and_then(project::parse_positions) {
        report.table = project::project(report.table, &positions);
    }

    if let Some(key) = sort {
        if !report.table.headers.is_empty() {
            let width = report.table.headers.len();
            let rows = std::mem::take(&mut report.table.rows);
            report.table.rows = sort::sort_rows(rows, key, width);
        } else {
            debug!("No columns; skipping sort");
        }
    }

    Ok(report)
}

fn finish_table(
    mut t: ParsedTable,
    add_line_numbers: bool,
    eol: LineEnding,
    style: TableStyle,
) -> String {
    if add_line_numbers {
        t = table::add_line_numbers(t);
    }
    table::render(&t, style, eol)
}
