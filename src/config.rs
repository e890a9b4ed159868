//! Configuration types for CSV-to-Markdown conversion.
//!
//! The option values here are exactly what a serving layer collects from an
//! upload form: an encoding hint, how to split the text into fields, which
//! columns to keep, how to sort, and which output to produce. Every value is
//! immutable once built and is only ever borrowed by the pipeline, so one
//! config can be shared by any number of concurrent conversions.
//!
//! Label parsing is deliberately lenient: `from_label` maps the recognized
//! form values and falls back to the default for anything else, mirroring
//! the "degrade, don't fail" policy of the rest of the core. The one
//! exception is the delimiter, where a multi-character value cannot be
//! honoured and is rejected.

use crate::error::Csv2MdError;
use serde::{Deserialize, Serialize};

/// Configuration for one conversion via [`crate::convert::convert_bytes`].
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_csv2md::{ConversionConfig, Delimiter, OutputFormat};
///
/// let config = ConversionConfig::builder()
///     .delimiter(Delimiter::Char(';'))
///     .positions("2,1")
///     .format(OutputFormat::Jira)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Source encoding hint. Default: [`Encoding::Auto`].
    ///
    /// `Auto` never fails: it tries UTF-16 (BOM), UTF-8, windows-1250 and
    /// finally lossy UTF-8. Pick an explicit encoding when a wrong guess
    /// should be reported as an error rather than produce mojibake.
    pub encoding: Encoding,

    /// Dialect, header and skip/limit options.
    pub parse: ParseOptions,

    /// Comma-separated 1-based column positions, e.g. `"3,1"`. Default: all columns.
    ///
    /// Positions select and reorder columns before sorting, so a sort field
    /// refers to the projected order. Non-numeric and out-of-range tokens are
    /// ignored; if nothing valid remains, every column is kept.
    pub positions: Option<String>,

    /// Optional sort applied after projection.
    pub sort: Option<SortKey>,

    /// Prepend a `#` column with 1-based row numbers (tables only). Default: false.
    pub line_numbers: bool,

    /// Line terminator for table output. Default: LF.
    pub eol: LineEnding,

    /// Which renderer to run. Default: [`OutputFormat::Notebook`].
    pub format: OutputFormat,

    /// Field selection for the outline renderer. Default: [`Detail::Minimal`].
    pub detail: Detail,

    /// Free text placed above the rendered output, separated by a blank line.
    ///
    /// Typically a Markdown heading or a note telling the reader where the
    /// data came from. It is normalized to end with exactly one blank line,
    /// whether or not the caller included trailing newlines.
    pub preamble: String,

    /// Cap on the number of records emitted by the outline renderer. Default: None.
    ///
    /// Long-form assistants have a source-size limit, and a 50 000-row
    /// export rendered as an outline can exceed it. The cap applies after
    /// sorting, so the outline keeps the top rows. Table formats ignore it;
    /// [`crate::output::ConversionStats::rows`] always reports the full count.
    pub max_rows: Option<usize>,
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.config.encoding = encoding;
        self
    }

    pub fn parse_options(mut self, parse: ParseOptions) -> Self {
        self.config.parse = parse;
        self
    }

    pub fn delimiter(mut self, delimiter: Delimiter) -> Self {
        self.config.parse.delimiter = delimiter;
        self
    }

    pub fn has_header(mut self, v: bool) -> Self {
        self.config.parse.has_header = v;
        self
    }

    pub fn skip_lines(mut self, n: usize) -> Self {
        self.config.parse.skip_lines = n;
        self
    }

    pub fn limit_lines(mut self, n: usize) -> Self {
        self.config.parse.limit_lines = Some(n);
        self
    }

    pub fn quote_mode(mut self, mode: QuoteMode) -> Self {
        self.config.parse.quote_mode = mode;
        self
    }

    pub fn quote_char(mut self, c: char) -> Self {
        self.config.parse.quote_char = c;
        self
    }

    pub fn positions(mut self, positions: impl Into<String>) -> Self {
        let positions = positions.into();
        self.config.positions = if positions.trim().is_empty() {
            None
        } else {
            Some(positions)
        };
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.config.sort = Some(key);
        self
    }

    pub fn line_numbers(mut self, v: bool) -> Self {
        self.config.line_numbers = v;
        self
    }

    pub fn eol(mut self, eol: LineEnding) -> Self {
        self.config.eol = eol;
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn detail(mut self, detail: Detail) -> Self {
        self.config.detail = detail;
        self
    }

    pub fn preamble(mut self, preamble: impl Into<String>) -> Self {
        self.config.preamble = preamble.into();
        self
    }

    pub fn max_rows(mut self, n: usize) -> Self {
        self.config.max_rows = Some(n);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Csv2MdError> {
        self.config.parse.validate()?;
        Ok(self.config)
    }
}

// ── Parse options ────────────────────────────────────────────────────────

/// How the decoded text is split into a header and data rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Field separator, or [`Delimiter::Auto`] to sniff it. Default: auto.
    pub delimiter: Delimiter,

    /// Treat the first remaining row as the header. Default: true.
    pub has_header: bool,

    /// Number of leading records to drop (including a would-be header).
    pub skip_lines: usize,

    /// Keep at most this many records after skipping (header included).
    pub limit_lines: Option<usize>,

    /// Quote interpretation. Default: standard.
    pub quote_mode: QuoteMode,

    /// Quote character for [`QuoteMode::Standard`]. Default: `"`.
    pub quote_char: char,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Auto,
            has_header: true,
            skip_lines: 0,
            limit_lines: None,
            quote_mode: QuoteMode::Standard,
            quote_char: '"',
        }
    }
}

impl ParseOptions {
    /// The tokenizer works on bytes, so the delimiter and quote character
    /// must both be single ASCII characters.
    pub fn validate(&self) -> Result<(), Csv2MdError> {
        if let Delimiter::Char(c) = self.delimiter {
            if !c.is_ascii() {
                return Err(Csv2MdError::InvalidConfig(format!(
                    "delimiter must be an ASCII character, got {c:?}"
                )));
            }
        }
        if !self.quote_char.is_ascii() {
            return Err(Csv2MdError::InvalidConfig(format!(
                "quote character must be an ASCII character, got {:?}",
                self.quote_char
            )));
        }
        Ok(())
    }
}

/// Source encoding hint for [`crate::convert::decode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Encoding {
    /// BOM sniffing, UTF-8, UTF-16 on embedded NULs, cp1250, lossy UTF-8.
    #[default]
    Auto,
    /// Strict UTF-8; a leading BOM is stripped.
    Utf8,
    /// Strict UTF-16; BOM selects endianness, little-endian otherwise.
    Utf16,
    /// Strict windows-1250 (Central European).
    Cp1250,
    /// Any other codec label, decoded with replacement characters.
    Label(String),
}

impl Encoding {
    pub fn from_label(label: &str) -> Self {
        let l = label.trim().to_ascii_lowercase();
        match l.as_str() {
            "" | "auto" => Encoding::Auto,
            "utf-8" | "utf8" => Encoding::Utf8,
            "utf-16" | "utf16" => Encoding::Utf16,
            "cp1250" | "windows-1250" | "win1250" => Encoding::Cp1250,
            _ => Encoding::Label(l),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Encoding::Auto => "auto",
            Encoding::Utf8 => "utf-8",
            Encoding::Utf16 => "utf-16",
            Encoding::Cp1250 => "cp1250",
            Encoding::Label(l) => l,
        }
    }
}

impl From<String> for Encoding {
    fn from(s: String) -> Self {
        Encoding::from_label(&s)
    }
}

impl From<Encoding> for String {
    fn from(e: Encoding) -> Self {
        e.as_str().to_string()
    }
}

/// Field separator selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Delimiter {
    /// Sniff from the first ~4 KB among `, ; \t |`.
    #[default]
    Auto,
    /// Use this character verbatim.
    Char(char),
}

impl Delimiter {
    /// Parse a form value: `auto`, `tab`, `pipe`, or a single character.
    pub fn from_label(label: &str) -> Result<Self, Csv2MdError> {
        match label {
            "" | "auto" => return Ok(Delimiter::Auto),
            "tab" => return Ok(Delimiter::Char('\t')),
            "pipe" => return Ok(Delimiter::Char('|')),
            _ => {}
        }
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Delimiter::Char(c)),
            _ => Err(Csv2MdError::InvalidConfig(format!(
                "delimiter must be 'auto', 'tab', 'pipe' or a single character, got {label:?}"
            ))),
        }
    }
}

impl TryFrom<String> for Delimiter {
    type Error = Csv2MdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Delimiter::from_label(&s)
    }
}

impl From<Delimiter> for String {
    fn from(d: Delimiter) -> Self {
        match d {
            Delimiter::Auto => "auto".to_string(),
            Delimiter::Char('\t') => "tab".to_string(),
            Delimiter::Char('|') => "pipe".to_string(),
            Delimiter::Char(c) => c.to_string(),
        }
    }
}

/// Quote interpretation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteMode {
    /// Quote-aware splitting; a doubled quote inside a quoted field is a literal quote.
    #[default]
    Standard,
    /// Quote characters are ordinary data.
    NoQuotes,
}

impl QuoteMode {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "no_quotes" | "none" | "treat-quotes-as-data" => QuoteMode::NoQuotes,
            _ => QuoteMode::Standard,
        }
    }
}

// ── Sorting ──────────────────────────────────────────────────────────────

/// Single-column sort applied after projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// 1-based column index into the projected table; clamped at use time.
    pub field: usize,
    #[serde(default)]
    pub kind: SortType,
    #[serde(default)]
    pub direction: SortDirection,
    /// Case-insensitive string comparison. Default: true.
    #[serde(default = "default_true")]
    pub ignore_case: bool,
}

fn default_true() -> bool {
    true
}

impl SortKey {
    /// Ascending, case-insensitive string sort on `field` (1-based).
    pub fn new(field: usize) -> Self {
        Self {
            field,
            kind: SortType::String,
            direction: SortDirection::Asc,
            ignore_case: true,
        }
    }

    pub fn numeric(mut self) -> Self {
        self.kind = SortType::Numeric;
        self
    }

    pub fn descending(mut self) -> Self {
        self.direction = SortDirection::Desc;
        self
    }

    pub fn case_sensitive(mut self) -> Self {
        self.ignore_case = false;
        self
    }
}

/// How sort values are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    #[default]
    String,
    /// Parse as a float after turning `,` into `.`; unparsable values sort first.
    Numeric,
}

impl SortType {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "numeric" => SortType::Numeric,
            _ => SortType::String,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "desc" => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

// ── Rendering ────────────────────────────────────────────────────────────

/// Line terminator for table output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "crlf" => LineEnding::Crlf,
            _ => LineEnding::Lf,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Table markup dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStyle {
    /// GFM pipe table with a `|---|` separator row.
    #[default]
    Markdown,
    /// `|| header ||` row followed by `| cell |` rows.
    Jira,
}

impl TableStyle {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "jira" => TableStyle::Jira,
            _ => TableStyle::Markdown,
        }
    }
}

/// Field selection for the outline renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Detail {
    /// Every non-empty column.
    Full,
    /// Curated keyword-research columns, or the first eight as a fallback.
    #[default]
    Minimal,
}

impl Detail {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "full" => Detail::Full,
            _ => Detail::Minimal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Detail::Full => "full",
            Detail::Minimal => "minimal",
        }
    }
}

/// Which renderer [`crate::convert::convert_bytes`] dispatches to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown pipe table.
    Table,
    /// Jira table markup.
    Jira,
    /// Per-record outline for NotebookLM.
    #[default]
    #[serde(alias = "notebooklm")]
    Notebook,
}

impl OutputFormat {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "table" | "markdown" => OutputFormat::Table,
            "jira" => OutputFormat::Jira,
            _ => OutputFormat::Notebook,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_labels() {
        assert_eq!(Delimiter::from_label("auto").unwrap(), Delimiter::Auto);
        assert_eq!(Delimiter::from_label("tab").unwrap(), Delimiter::Char('\t'));
        assert_eq!(Delimiter::from_label("pipe").unwrap(), Delimiter::Char('|'));
        assert_eq!(Delimiter::from_label(";").unwrap(), Delimiter::Char(';'));
        assert!(Delimiter::from_label(";;").is_err());
    }

    #[test]
    fn lenient_labels_fall_back_to_default() {
        assert_eq!(LineEnding::from_label("CRLF"), LineEnding::Crlf);
        assert_eq!(LineEnding::from_label("weird"), LineEnding::Lf);
        assert_eq!(TableStyle::from_label("confluence"), TableStyle::Markdown);
        assert_eq!(Detail::from_label("FULL"), Detail::Full);
        assert_eq!(Detail::from_label(""), Detail::Minimal);
        assert_eq!(SortType::from_label("numeric"), SortType::Numeric);
        assert_eq!(SortDirection::from_label("down"), SortDirection::Asc);
        assert_eq!(QuoteMode::from_label("no_quotes"), QuoteMode::NoQuotes);
        assert_eq!(OutputFormat::from_label("notebooklm"), OutputFormat::Notebook);
    }

    #[test]
    fn encoding_labels() {
        assert_eq!(Encoding::from_label(" UTF8 "), Encoding::Utf8);
        assert_eq!(Encoding::from_label("windows-1250"), Encoding::Cp1250);
        assert_eq!(
            Encoding::from_label("ISO-8859-2"),
            Encoding::Label("iso-8859-2".into())
        );
    }

    #[test]
    fn builder_rejects_non_ascii_delimiter() {
        let err = ConversionConfig::builder()
            .delimiter(Delimiter::Char('§'))
            .build()
            .unwrap_err();
        assert!(matches!(err, Csv2MdError::InvalidConfig(_)));
    }

    #[test]
    fn builder_blank_positions_mean_all_columns() {
        let config = ConversionConfig::builder().positions("  ").build().unwrap();
        assert!(config.positions.is_none());
    }

    #[test]
    fn sort_key_helpers() {
        let key = SortKey::new(2).numeric().descending().case_sensitive();
        assert_eq!(key.field, 2);
        assert_eq!(key.kind, SortType::Numeric);
        assert_eq!(key.direction, SortDirection::Desc);
        assert!(!key.ignore_case);
    }
}
