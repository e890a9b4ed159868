//! Pipeline stages for CSV-to-Markdown conversion.
//!
//! Each submodule implements exactly one transformation step and holds no
//! state between calls, so stages are independently testable and any number
//! of conversions can run side by side.
//!
//! ## Data Flow
//!
//! ```text
//! bytes ──▶ decode ──▶ parse ──▶ project ──▶ sort ──▶ table | outline
//!           (text)    (dialect)  (columns)   (rows)    (markup)
//! ```
//!
//! 1. [`decode`]  — bytes to text with BOM sniffing and encoding fallback
//! 2. [`dialect`] — delimiter/quote resolution, including sniffing
//! 3. [`parse`]   — tiered tokenizing, skip/limit and header derivation
//! 4. [`project`] — keep/reorder columns by 1-based position
//! 5. [`sort`]    — stable single-column sort
//! 6. [`table`]   — Markdown or Jira pipe table
//! 7. [`outline`] — per-record heading + bullets ("notebook" format)

pub mod decode;
pub mod dialect;
pub mod outline;
pub mod parse;
pub mod project;
pub mod sort;
pub mod table;
