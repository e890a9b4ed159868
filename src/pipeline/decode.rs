//! Byte decoding: raw upload bytes → `String`.
//!
//! Spreadsheet tools disagree wildly about encodings. Excel on Windows likes
//! UTF-16 with a BOM for "Unicode text" exports, LibreOffice writes UTF-8
//! (sometimes with a BOM), and older Czech/Slovak/Polish installs still emit
//! windows-1250. With [`Encoding::Auto`] the decoder walks this ladder:
//!
//! 1. UTF-16 BOM (either endianness) → UTF-16
//! 2. UTF-8 (BOM stripped); embedded NULs mean it was really BOM-less UTF-16
//! 3. windows-1250
//! 4. UTF-8 with U+FFFD replacement characters
//!
//! so the automatic path always returns text. Explicit hints are strict and
//! report invalid bytes as [`Csv2MdError::DecodeFailed`], except raw codec
//! labels which decode with replacement characters.

use crate::config::Encoding;
use crate::error::Csv2MdError;
use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1250};
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Byte values windows-1250 leaves unassigned. A strict decoder rejects them.
const CP1250_UNDEFINED: [u8; 5] = [0x81, 0x83, 0x88, 0x90, 0x98];

/// Decode `raw` according to `hint`.
///
/// Never fails for [`Encoding::Auto`].
pub fn decode(raw: &[u8], hint: &Encoding) -> Result<String, Csv2MdError> {
    match hint {
        Encoding::Auto => Ok(decode_auto(raw)),
        Encoding::Utf8 => decode_utf8_strict(raw).map_err(|detail| Csv2MdError::DecodeFailed {
            encoding: "utf-8".into(),
            detail,
        }),
        Encoding::Utf16 => decode_utf16_strict(raw).ok_or_else(|| Csv2MdError::DecodeFailed {
            encoding: "utf-16".into(),
            detail: "odd byte count or unpaired surrogate".into(),
        }),
        Encoding::Cp1250 => decode_cp1250_strict(raw).ok_or_else(|| Csv2MdError::DecodeFailed {
            encoding: "cp1250".into(),
            detail: "byte not defined in windows-1250".into(),
        }),
        Encoding::Label(label) => decode_label(raw, label),
    }
}

fn decode_auto(raw: &[u8]) -> String {
    if raw.starts_with(b"\xFF\xFE") || raw.starts_with(b"\xFE\xFF") {
        debug!("UTF-16 BOM found");
        return decode_utf16_lossy(raw);
    }

    match decode_utf8_strict(raw) {
        Ok(text) if text.contains('\0') => {
            debug!("UTF-8 text contains NULs; re-decoding as UTF-16");
            return decode_utf16_lossy(raw);
        }
        Ok(text) => return text,
        Err(detail) => debug!("Not UTF-8 ({}); trying windows-1250", detail),
    }

    if let Some(text) = decode_cp1250_strict(raw) {
        return text;
    }

    warn!("Input is neither UTF-8 nor windows-1250; decoding as UTF-8 with replacement");
    let (text, _) = UTF_8.decode_without_bom_handling(raw);
    text.into_owned()
}

/// UTF-8 with an optional leading BOM. The error string locates the first bad byte.
fn decode_utf8_strict(raw: &[u8]) -> Result<String, String> {
    let body = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    std::str::from_utf8(body)
        .map(str::to_owned)
        .map_err(|e| format!("invalid byte sequence at offset {}", e.valid_up_to()))
}

/// Split off a UTF-16 BOM, defaulting to little-endian like Windows tools do.
fn utf16_codec(raw: &[u8]) -> (&'static encoding_rs::Encoding, &[u8]) {
    match encoding_rs::Encoding::for_bom(raw) {
        Some((enc, len)) if enc == UTF_16LE || enc == UTF_16BE => (enc, &raw[len..]),
        _ => (UTF_16LE, raw),
    }
}

fn decode_utf16_strict(raw: &[u8]) -> Option<String> {
    let (codec, body) = utf16_codec(raw);
    codec
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
}

fn decode_utf16_lossy(raw: &[u8]) -> String {
    let (codec, body) = utf16_codec(raw);
    let (text, had_errors) = codec.decode_without_bom_handling(body);
    if had_errors {
        warn!("{} input contained invalid sequences; replaced", codec.name());
    }
    text.into_owned()
}

fn decode_cp1250_strict(raw: &[u8]) -> Option<String> {
    if raw.iter().any(|b| CP1250_UNDEFINED.contains(b)) {
        return None;
    }
    WINDOWS_1250
        .decode_without_bom_handling_and_without_replacement(raw)
        .map(|text| text.into_owned())
}

/// Resolve a free-form codec name. Form values often use other spellings
/// than the WHATWG registry (`utf_8`, `iso8859_2`, `latin-1`), so the label
/// is retried with `_` turned into `-`, then with separators removed.
fn lookup_label(label: &str) -> Option<&'static encoding_rs::Encoding> {
    let label = label.trim().to_ascii_lowercase();
    let hyphenated = label.replace('_', "-");
    let squashed = hyphenated.replace('-', "");
    [label, hyphenated, squashed]
        .iter()
        .find_map(|candidate| encoding_rs::Encoding::for_label(candidate.as_bytes()))
}

fn decode_label(raw: &[u8], label: &str) -> Result<String, Csv2MdError> {
    let codec = lookup_label(label).ok_or_else(|| Csv2MdError::UnsupportedEncoding {
        label: label.to_string(),
    })?;
    debug!("Codec label '{}' resolved to {}", label, codec.name());
    if codec == UTF_16LE || codec == UTF_16BE {
        return Ok(decode_utf16_lossy(raw));
    }
    let (text, had_errors) = codec.decode_without_bom_handling(raw);
    if had_errors {
        warn!("Invalid {} sequences replaced", codec.name());
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le(s: &str, bom: bool) -> Vec<u8> {
        let mut out = if bom { vec![0xFF, 0xFE] } else { Vec::new() };
        for unit in s.encode_utf16() {
            out.extend_from_slice(&unit.to_le_bytes());
        }
        out
    }

    fn utf16be_bom(s: &str) -> Vec<u8> {
        let mut out = vec![0xFE, 0xFF];
        for unit in s.encode_utf16() {
            out.extend_from_slice(&unit.to_be_bytes());
        }
        out
    }

    #[test]
    fn auto_plain_utf8_round_trips() {
        let text = "Keyword;Objem\nžluťoučký kůň;1200\n";
        assert_eq!(decode(text.as_bytes(), &Encoding::Auto).unwrap(), text);
    }

    #[test]
    fn auto_strips_utf8_bom() {
        let mut raw = UTF8_BOM.to_vec();
        raw.extend_from_slice(b"a,b\n1,2\n");
        assert_eq!(decode(&raw, &Encoding::Auto).unwrap(), "a,b\n1,2\n");
    }

    #[test]
    fn auto_follows_utf16_boms() {
        let text = "Keyword\tVolume\nřeka\t10\n";
        assert_eq!(decode(&utf16le(text, true), &Encoding::Auto).unwrap(), text);
        assert_eq!(decode(&utf16be_bom(text), &Encoding::Auto).unwrap(), text);
    }

    #[test]
    fn auto_detects_bomless_utf16_by_nuls() {
        let raw = utf16le("a,b\n1,2\n", false);
        assert_eq!(decode(&raw, &Encoding::Auto).unwrap(), "a,b\n1,2\n");
    }

    #[test]
    fn auto_falls_back_to_cp1250() {
        // "ř" is 0xF8 in windows-1250 and not valid UTF-8 on its own.
        let raw = b"Kl\xED\xE8ov\xE9 slovo;Objem\n\xF8eka;5\n";
        let text = decode(raw, &Encoding::Auto).unwrap();
        assert_eq!(text, "Klíčové slovo;Objem\nřeka;5\n");
    }

    #[test]
    fn auto_last_resort_is_lossy_utf8() {
        let raw = [0x81, b'A'];
        assert_eq!(decode(&raw, &Encoding::Auto).unwrap(), "\u{FFFD}A");
    }

    #[test]
    fn explicit_utf8_rejects_invalid_bytes() {
        let err = decode(b"ok\xF8", &Encoding::Utf8).unwrap_err();
        assert!(matches!(err, Csv2MdError::DecodeFailed { .. }));
        assert!(err.to_string().contains("offset 2"));
    }

    #[test]
    fn explicit_utf16_defaults_to_little_endian() {
        let raw = utf16le("x;y", false);
        assert_eq!(decode(&raw, &Encoding::Utf16).unwrap(), "x;y");
        assert!(decode(&[0x41], &Encoding::Utf16).is_err());
    }

    #[test]
    fn explicit_cp1250_rejects_undefined_bytes() {
        assert_eq!(decode(b"\xF8", &Encoding::Cp1250).unwrap(), "ř");
        assert!(decode(b"\x98", &Encoding::Cp1250).is_err());
    }

    #[test]
    fn raw_label_decodes_lossily() {
        let hint = Encoding::from_label("iso-8859-2");
        assert_eq!(decode(b"\xF8", &hint).unwrap(), "ř");
    }

    #[test]
    fn label_spellings_are_normalized() {
        let raw = b"A;B\n\xE8;1\n";
        for label in ["latin-1", "iso8859_2", "utf_8", "ISO_8859-2", "cp1252"] {
            assert!(
                decode(raw, &Encoding::from_label(label)).is_ok(),
                "label {label} should resolve"
            );
        }
        let hint = Encoding::from_label("iso8859_2");
        assert_eq!(decode(b"\xE8", &hint).unwrap(), "č");
        let hint = Encoding::from_label("utf_8");
        assert_eq!(decode(b"ok\xE8", &hint).unwrap(), "ok\u{FFFD}");
    }

    #[test]
    fn utf16_label_honours_bom() {
        let raw = utf16be_bom("x;y");
        assert_eq!(decode(&raw, &Encoding::from_label("utf_16")).unwrap(), "x;y");
    }

    #[test]
    fn unknown_label_is_unsupported() {
        let err = decode(b"abc", &Encoding::Label("klingon-8".into())).unwrap_err();
        assert!(matches!(err, Csv2MdError::UnsupportedEncoding { .. }));
        // No OEM code pages in the registry.
        assert!(decode(b"abc", &Encoding::from_label("cp852")).is_err());
    }
}
