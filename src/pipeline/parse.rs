//! Tolerant CSV parsing: text → header labels + data rows.
//!
//! ## Strategy chain
//!
//! Real-world exports are frequently broken (an unclosed quote, a stray line
//! break inside an unquoted cell). Rather than nesting error handlers, the
//! parser tries an explicit, ordered list of [`ParseStrategy`] values and
//! keeps the first one that succeeds:
//!
//! | Tier | Strategy | Gives up correctness for |
//! |------|----------|--------------------------|
//! | 1 | [`ParseStrategy::Stream`]  | nothing; quoted fields may span lines |
//! | 2 | [`ParseStrategy::PerLine`] | quoted fields containing line breaks |
//! | 3 | [`ParseStrategy::Naive`]   | all quoting |
//!
//! The naive tier cannot fail, so [`Csv2MdError::MalformedCsv`] only escapes
//! [`parse`] if that invariant is ever broken.
//!
//! The stream and per-line tiers turn every blank line into an empty record,
//! so `skip_lines` counts physical lines (a title block followed by a blank
//! line is two lines). The naive tier drops blank lines.
//!
//! After tokenizing, `skip_lines` leading records are dropped, `limit_lines`
//! caps the remainder, and the header is derived.

use crate::config::ParseOptions;
use crate::error::Csv2MdError;
use crate::pipeline::dialect::Dialect;
use csv::ReaderBuilder;
use tracing::{debug, warn};

/// Header labels plus data rows.
///
/// `headers.len()` is the canonical width. Rows may be shorter (missing cells
/// read as empty strings) or longer; they are never truncated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ParsedTable {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}

/// One tokenizing approach. See the module docs for the tier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// The whole text as one quoted-CSV stream.
    Stream,
    /// Each physical line parsed on its own.
    PerLine,
    /// Split on the most frequent candidate delimiter of the first line, no quoting.
    Naive,
}

impl ParseStrategy {
    /// Tiers in the order they are attempted.
    pub const FALLBACK_ORDER: [ParseStrategy; 3] = [
        ParseStrategy::Stream,
        ParseStrategy::PerLine,
        ParseStrategy::Naive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParseStrategy::Stream => "stream",
            ParseStrategy::PerLine => "per-line",
            ParseStrategy::Naive => "naive",
        }
    }

    /// Tokenize LF-normalized `text` into records.
    pub fn tokenize(self, text: &str, dialect: &Dialect) -> Result<Vec<Vec<String>>, Csv2MdError> {
        match self {
            ParseStrategy::Stream => tokenize_stream(text, dialect),
            ParseStrategy::PerLine => tokenize_per_line(text, dialect),
            ParseStrategy::Naive => Ok(tokenize_naive(text, dialect)),
        }
    }
}

/// Result of [`parse_with_report`]: the table plus what it took to get it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    pub table: ParsedTable,
    pub strategy: ParseStrategy,
    pub dialect: Dialect,
}

/// Parse `text` into a header and data rows.
pub fn parse(text: &str, opts: &ParseOptions) -> Result<ParsedTable, Csv2MdError> {
    parse_with_report(text, opts).map(|report| report.table)
}

/// Like [`parse`], but also reports the winning strategy and dialect.
pub fn parse_with_report(text: &str, opts: &ParseOptions) -> Result<ParseReport, Csv2MdError> {
    let normalized = normalize_line_endings(text);
    let dialect = Dialect::resolve(&normalized, opts)?;

    let mut last_error = None;
    for strategy in ParseStrategy::FALLBACK_ORDER {
        match strategy.tokenize(&normalized, &dialect) {
            Ok(records) => {
                debug!(
                    "{} parser produced {} records",
                    strategy.name(),
                    records.len()
                );
                let table = shape(records, opts);
                debug!(
                    "Parsed {} columns, {} data rows",
                    table.headers.len(),
                    table.rows.len()
                );
                return Ok(ParseReport {
                    table,
                    strategy,
                    dialect,
                });
            }
            Err(e) => {
                warn!("{}; falling back to the next parser", e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Csv2MdError::MalformedCsv {
        tier: "none",
        detail: "no parse strategy configured".into(),
    }))
}

/// Collapse CRLF and bare CR to LF.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Strip NULs, stray BOMs and surrounding whitespace from a header label.
pub fn clean_header(label: &str) -> String {
    label
        .replace('\0', "")
        .trim_start_matches('\u{FEFF}')
        .trim()
        .to_string()
}

// ── Tier 1: whole-text stream ────────────────────────────────────────────

fn reader_builder(dialect: &Dialect) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .delimiter(dialect.delimiter)
        .quote(dialect.quote)
        .quoting(dialect.quoting)
        .double_quote(true);
    builder
}

fn read_records(
    input: &str,
    dialect: &Dialect,
    tier: &'static str,
) -> Result<Vec<Vec<String>>, Csv2MdError> {
    let mut reader = reader_builder(dialect).from_reader(input.as_bytes());
    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| Csv2MdError::MalformedCsv {
            tier,
            detail: e.to_string(),
        })?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(records)
}

fn tokenize_stream(text: &str, dialect: &Dialect) -> Result<Vec<Vec<String>>, Csv2MdError> {
    let (lines, unterminated) = split_records(text, dialect);
    if unterminated {
        // The rest of the file would silently collapse into one cell.
        return Err(Csv2MdError::MalformedCsv {
            tier: ParseStrategy::Stream.name(),
            detail: "unterminated quoted field".into(),
        });
    }
    read_lines(lines, dialect, ParseStrategy::Stream.name())
}

/// Split LF-normalized `text` at every line break outside a quoted field.
///
/// A trailing line break ends the last record instead of opening an empty
/// one. The flag is true when a quoted field opened at the start of a field
/// is still open at the end of `text`; a quote in the middle of an unquoted
/// field is data.
fn split_records<'a>(text: &'a str, dialect: &Dialect) -> (Vec<&'a str>, bool) {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if in_quotes {
            if b == dialect.quote {
                if bytes.get(i + 1) == Some(&dialect.quote) {
                    i += 1;
                } else {
                    in_quotes = false;
                }
            }
        } else if dialect.quoting && b == dialect.quote && at_field_start {
            in_quotes = true;
            at_field_start = false;
        } else if b == b'\n' {
            lines.push(&text[start..i]);
            start = i + 1;
            at_field_start = true;
        } else {
            at_field_start = b == dialect.delimiter;
        }
        i += 1;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    (lines, in_quotes)
}

/// Tokenize one record per entry. A blank line is an empty record, so it
/// still counts towards `skip_lines` and `limit_lines`.
fn read_lines<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    dialect: &Dialect,
    tier: &'static str,
) -> Result<Vec<Vec<String>>, Csv2MdError> {
    let mut records = Vec::new();
    for line in lines {
        if line.is_empty() {
            records.push(Vec::new());
        } else {
            records.extend(read_records(line, dialect, tier)?);
        }
    }
    Ok(records)
}

// ── Tier 2: physical lines ───────────────────────────────────────────────

fn tokenize_per_line(text: &str, dialect: &Dialect) -> Result<Vec<Vec<String>>, Csv2MdError> {
    read_lines(text.lines(), dialect, ParseStrategy::PerLine.name())
}

// ── Tier 3: naive split ──────────────────────────────────────────────────

const NAIVE_CANDIDATES: [u8; 4] = [b';', b',', b'\t', b'|'];

fn tokenize_naive(text: &str, dialect: &Dialect) -> Vec<Vec<String>> {
    let lines: Vec<&str> = text.split('\n').filter(|l| !l.is_empty()).collect();
    let first = lines.first().copied().unwrap_or("");

    // The resolved delimiter is listed first so it wins ties.
    let mut delimiter = dialect.delimiter;
    let mut best = first.bytes().filter(|&b| b == delimiter).count();
    for candidate in NAIVE_CANDIDATES {
        let count = first.bytes().filter(|&b| b == candidate).count();
        if count > best {
            best = count;
            delimiter = candidate;
        }
    }

    let delimiter = delimiter as char;
    lines
        .iter()
        .map(|line| line.split(delimiter).map(str::to_string).collect())
        .collect()
}

// ── Skip / limit / header ────────────────────────────────────────────────

fn shape(records: Vec<Vec<String>>, opts: &ParseOptions) -> ParsedTable {
    let mut records: Vec<Vec<String>> = records.into_iter().skip(opts.skip_lines).collect();
    if let Some(limit) = opts.limit_lines {
        records.truncate(limit);
    }
    if records.is_empty() {
        return ParsedTable::default();
    }

    if opts.has_header {
        let mut iter = records.into_iter();
        let headers = iter
            .next()
            .map(|h| h.iter().map(|label| clean_header(label)).collect())
            .unwrap_or_default();
        ParsedTable {
            headers,
            rows: iter.collect(),
        }
    } else {
        let width = records.iter().map(Vec::len).max().unwrap_or(0);
        ParsedTable {
            headers: (1..=width).map(|i| format!("Field {i}")).collect(),
            rows: records,
        }
    }
}
