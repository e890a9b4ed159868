//! Error types for the edgequake-csv2md library.
//!
//! The conversion core is built to degrade rather than fail: unknown sort
//! fields clamp, unmatched projections pass through, unparsable numbers sort
//! first and the automatic decoder always produces *some* text. Only three
//! situations are reported as errors:
//!
//! * **Decode failures** — the caller explicitly asked for a codec and the
//!   bytes are not valid in it ([`Csv2MdError::DecodeFailed`]), or the codec
//!   label is unknown ([`Csv2MdError::UnsupportedEncoding`]).
//! * **Malformed CSV** — every parse tier failed. The naive last tier makes
//!   this effectively unreachable, but the variant also carries per-tier
//!   failures between strategies so they can be logged.
//! * **Invalid configuration** — builder validation.
//!
//! A serving layer should catch [`Csv2MdError::MalformedCsv`] and show a
//! user-actionable message; anything else is an unexpected fault to be
//! reported verbatim.

use thiserror::Error;

/// All errors returned by the edgequake-csv2md library.
#[derive(Debug, Error)]
pub enum Csv2MdError {
    // ── Decode errors ─────────────────────────────────────────────────────
    /// The bytes are invalid in the explicitly requested encoding.
    #[error("Input is not valid {encoding}: {detail}\nTry encoding 'auto' or re-export the CSV as UTF-8.")]
    DecodeFailed { encoding: String, detail: String },

    /// The requested codec label is not known.
    #[error("Unsupported encoding '{label}'")]
    UnsupportedEncoding { label: String },

    // ── Parse errors ──────────────────────────────────────────────────────
    /// A parse strategy could not tokenize the input.
    #[error("Malformed CSV ({tier} parser): {detail}\nTypical causes are unclosed quotes or odd line endings; try re-exporting the file.")]
    MalformedCsv { tier: &'static str, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Csv2MdError {
    /// True for the error kind a serving layer should turn into a
    /// "please fix your file" message.
    pub fn is_malformed_csv(&self) -> bool {
        matches!(self, Csv2MdError::MalformedCsv { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failed_display() {
        let e = Csv2MdError::DecodeFailed {
            encoding: "utf-8".into(),
            detail: "invalid byte at offset 3".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("utf-8"), "got: {msg}");
        assert!(msg.contains("offset 3"), "got: {msg}");
    }

    #[test]
    fn unsupported_encoding_display() {
        let e = Csv2MdError::UnsupportedEncoding {
            label: "klingon-8".into(),
        };
        assert!(e.to_string().contains("klingon-8"));
    }

    #[test]
    fn malformed_csv_is_flagged() {
        let e = Csv2MdError::MalformedCsv {
            tier: "stream",
            detail: "unterminated quoted field".into(),
        };
        assert!(e.is_malformed_csv());
        assert!(e.to_string().contains("stream"));
        assert!(!Csv2MdError::InvalidConfig("x".into()).is_malformed_csv());
    }
}
