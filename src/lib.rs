//! # edgequake-csv2md
//!
//! Convert loosely-structured CSV exports to Markdown tables, Jira tables or
//! a per-record outline tuned for NotebookLM.
//!
//! ## Why this crate?
//!
//! CSV files that come out of spreadsheets and SEO tools are rarely clean:
//! UTF-16 with a BOM from Excel, windows-1250 from older Central European
//! installs, semicolons instead of commas, unclosed quotes and line breaks in
//! the middle of cells. This crate is tolerant of all of that. Every stage
//! degrades instead of failing, so an upload always produces *something*
//! readable.
//!
//! ## Pipeline Overview
//!
//! ```text
//! bytes
//!  │
//!  ├─ 1. Decode   BOM sniffing, UTF-8 → UTF-16 → cp1250 → lossy fallback
//!  ├─ 2. Parse    sniff delimiter, stream → per-line → naive tokenizing
//!  ├─ 3. Project  keep/reorder columns ("3,1,2")
//!  ├─ 4. Sort     stable, string or numeric, asc or desc
//!  └─ 5. Render   Markdown / Jira table, or NotebookLM outline
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use edgequake_csv2md::{convert_bytes, ConversionConfig, Detail};
//!
//! let config = ConversionConfig::builder()
//!     .detail(Detail::Full)
//!     .build()
//!     .unwrap();
//! let output = convert_bytes(b"Keyword,Volume\nseo tools,1200\n", &config).unwrap();
//! assert!(output.text.contains("### seo tools\n- **Volume**: 1200"));
//! ```
//!
//! The building blocks ([`decode`], [`render_table`], [`render_outline`])
//! are exported separately for callers that already hold decoded text.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod fields;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    ConversionConfig, ConversionConfigBuilder, Delimiter, Detail, Encoding, LineEnding,
    OutputFormat, ParseOptions, QuoteMode, SortDirection, SortKey, SortType, TableStyle,
};
pub use convert::{convert_bytes, decode, render_outline, render_table};
pub use error::Csv2MdError;
pub use fields::NOTEBOOK_MIN_FIELDS;
pub use output::{ConversionOutput, ConversionStats};
pub use pipeline::parse::{parse, ParsedTable};
