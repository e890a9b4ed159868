//! Dialect resolution: delimiter, quote character and quoting mode.
//!
//! A [`Dialect`] is a small `Copy` value resolved fresh for every parse from
//! the caller's [`ParseOptions`]. Nothing here is global or mutable, so two
//! concurrent conversions with different delimiters cannot see each other's
//! settings.

use crate::config::{Delimiter, ParseOptions, QuoteMode};
use crate::error::Csv2MdError;
use tracing::debug;

/// Candidates considered by the sniffer and the naive fallback tier.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Number of characters inspected when sniffing.
const SNIFF_SAMPLE_CHARS: usize = 4096;

/// Number of lines of the sample that are scored.
const SNIFF_SAMPLE_LINES: usize = 10;

/// How one line of text splits into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: u8,
    /// False in [`QuoteMode::NoQuotes`]: quote characters are plain data.
    pub quoting: bool,
}

impl Dialect {
    /// Resolve the dialect for `text`, sniffing the delimiter when it is `auto`.
    pub fn resolve(text: &str, opts: &ParseOptions) -> Result<Self, Csv2MdError> {
        opts.validate()?;
        let delimiter = match opts.delimiter {
            // validate() guarantees ASCII
            Delimiter::Char(c) => c as u8,
            Delimiter::Auto => {
                let sniffed = sniff_delimiter(text);
                debug!("Sniffed delimiter {:?}", sniffed as char);
                sniffed
            }
        };
        Ok(Self {
            delimiter,
            quote: opts.quote_char as u8,
            quoting: opts.quote_mode == QuoteMode::Standard,
        })
    }
}

/// Guess the delimiter from the first ~4 KB of `text`.
///
/// Each candidate is scored by its mean per-line count divided by
/// `1 + stddev`, so a character that appears the same number of times on
/// every line beats one that is merely frequent. Falls back to a comma when
/// no candidate appears at all.
pub fn sniff_delimiter(text: &str) -> u8 {
    let sample = match text.char_indices().nth(SNIFF_SAMPLE_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    };
    let lines: Vec<&str> = sample
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SNIFF_SAMPLE_LINES)
        .collect();
    if lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0.0f64;
    for &candidate in &CANDIDATE_DELIMITERS {
        let counts: Vec<f64> = lines
            .iter()
            .map(|line| line.bytes().filter(|&b| b == candidate).count() as f64)
            .collect();
        let mean = counts.iter().sum::<f64>() / counts.len() as f64;
        let variance =
            counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / counts.len() as f64;
        let score = mean / (1.0 + variance.sqrt());
        if score > best_score {
            best_score = score;
            best = candidate;
        }
    }
    best
}
