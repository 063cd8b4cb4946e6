//! Field extraction primitives
//!
//! Each primitive takes `(buffer, offset, length)` and returns a typed value.
//! Extraction is total: short of the buffer ending before the field, every
//! input produces a value. Unparseable numerics degrade to `Null` so a single
//! masked field ("***", "--") never rejects the whole record.

use encoding_rs::SHIFT_JIS;

use crate::FieldValue;

/// Extract an ASCII integer field
///
/// Leading/trailing spaces and leading zeroes are accepted. Empty or
/// all-space input yields `Null`. Vendor masking conventions ("***" runs,
/// "--" runs) and any other non-digit content also yield `Null`; the caller
/// decides whether to log a record-level warning.
pub fn read_int(buf: &[u8], offset: usize, length: usize) -> FieldValue {
    match field_slice(buf, offset, length) {
        Some(raw) => parse_int(raw).map(FieldValue::Int).unwrap_or(FieldValue::Null),
        None => FieldValue::Null,
    }
}

/// Extract an ASCII integer field carrying an implicit power-of-ten scale
///
/// Odds, race/lap times, and carried weights arrive multiplied by ten (or a
/// hundred); `scale` is the number of decimal digits folded into the wire
/// value, so bytes `"0035"` with `scale == 1` decode to `3.5`.
pub fn read_scaled(buf: &[u8], offset: usize, length: usize, scale: u8) -> FieldValue {
    match field_slice(buf, offset, length) {
        Some(raw) => match parse_int(raw) {
            Some(v) => FieldValue::Real(v as f64 / 10f64.powi(scale as i32)),
            None => FieldValue::Null,
        },
        None => FieldValue::Null,
    }
}

/// Extract a Shift-JIS text field
///
/// Trailing ASCII spaces are trimmed; an empty result yields `Null` so text
/// columns do not fill up with padding. Invalid multi-byte sequences fall
/// back to a byte-preserving single-byte decoding (`read_text_lossy`) rather
/// than failing the record.
pub fn read_text(buf: &[u8], offset: usize, length: usize) -> FieldValue {
    let Some(raw) = field_slice(buf, offset, length) else {
        return FieldValue::Null;
    };

    let (decoded, had_errors) = decode_shift_jis(raw);
    let text = if had_errors {
        read_text_lossy(raw)
    } else {
        decoded
    };

    let trimmed = text.trim_end_matches(' ');
    if trimmed.is_empty() {
        FieldValue::Null
    } else {
        FieldValue::Text(trimmed.to_string())
    }
}

/// Byte-preserving fallback decoding for damaged Shift-JIS
///
/// Every byte maps to exactly one char: printable ASCII passes through
/// unchanged, everything else becomes U+0080..U+00FF by value. The mapping
/// is injective, so the ASCII subsequences of the original bytes survive a
/// UTF-8 round trip untouched and nothing is dropped.
pub fn read_text_lossy(raw: &[u8]) -> String {
    raw.iter().map(|&b| b as char).collect()
}

/// Decode a Shift-JIS byte run, reporting whether replacement happened
fn decode_shift_jis(raw: &[u8]) -> (String, bool) {
    let (cow, _, had_errors) = SHIFT_JIS.decode(raw);
    (cow.into_owned(), had_errors)
}

/// Slice a field range out of the buffer, or `None` when the buffer ends
/// before the field starts. A field that starts in bounds but runs past the
/// end is truncated - the vendor occasionally pads the final field short.
fn field_slice(buf: &[u8], offset: usize, length: usize) -> Option<&[u8]> {
    if offset >= buf.len() {
        return None;
    }
    let end = (offset + length).min(buf.len());
    Some(&buf[offset..end])
}

/// Parse ASCII digits with optional leading spaces and a leading sign
///
/// Returns `None` for empty/all-space input and for anything containing a
/// non-digit (masked values like `"****"` or `"--"` included).
fn parse_int(raw: &[u8]) -> Option<i64> {
    let text = std::str::from_utf8(raw).ok()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<i64>().ok().map(|v| sign * v)
}
