//! Output types returned by [`crate::convert::convert_bytes`].

use serde::{Deserialize, Serialize};

/// The rendered document plus statistics about how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Final text: normalized preamble followed by the table or outline.
    pub text: String,
    pub stats: ConversionStats,
}

/// Statistics for one conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Data rows after parsing, projection and sorting (before any outline row cap).
    pub rows: usize,
    /// Columns after projection (before line numbering).
    pub columns: usize,
    /// Parse tier that produced the table: `stream`, `per-line` or `naive`.
    pub parse_strategy: String,
    /// Delimiter actually used by the tokenizer.
    pub delimiter: char,
    /// Wall-clock time for decode + parse + render.
    pub duration_ms: u64,
}
