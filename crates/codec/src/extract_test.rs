//! Tests for field extraction primitives
//!
//! Covers null rules, implicit scale, Shift-JIS fallback, and determinism.

use crate::extract::{read_int, read_scaled, read_text, read_text_lossy};
use crate::FieldValue;

// =============================================================================
// Integer extraction
// =============================================================================

#[test]
fn test_int_plain_digits() {
    assert_eq!(read_int(b"1234", 0, 4), FieldValue::Int(1234));
}

#[test]
fn test_int_leading_zeroes_and_spaces() {
    assert_eq!(read_int(b"0042", 0, 4), FieldValue::Int(42));
    assert_eq!(read_int(b"  42", 0, 4), FieldValue::Int(42));
}

#[test]
fn test_int_negative() {
    assert_eq!(read_int(b" -12", 0, 4), FieldValue::Int(-12));
}

#[test]
fn test_int_empty_and_spaces_are_null() {
    assert_eq!(read_int(b"    ", 0, 4), FieldValue::Null);
    assert_eq!(read_int(b"", 0, 0), FieldValue::Null);
}

#[test]
fn test_int_masked_values_are_null() {
    assert_eq!(read_int(b"****", 0, 4), FieldValue::Null);
    assert_eq!(read_int(b"--", 0, 2), FieldValue::Null);
    assert_eq!(read_int(b"01-3", 0, 4), FieldValue::Null);
}

#[test]
fn test_int_offset_into_buffer() {
    assert_eq!(read_int(b"RA10099", 3, 4), FieldValue::Int(99));
}

#[test]
fn test_int_past_end_is_null() {
    assert_eq!(read_int(b"RA", 5, 4), FieldValue::Null);
}

#[test]
fn test_int_truncated_tail() {
    // Field starts in bounds but the buffer ends early: parse what is there
    assert_eq!(read_int(b"RA12", 2, 4), FieldValue::Int(12));
}

// =============================================================================
// Scaled extraction
// =============================================================================

#[test]
fn test_scaled_single_decimal() {
    // Win odds are stored x10: "0035" means 3.5
    assert_eq!(read_scaled(b"0035", 0, 4, 1), FieldValue::Real(3.5));
}

#[test]
fn test_scaled_two_decimals() {
    assert_eq!(read_scaled(b"01234", 0, 5, 2), FieldValue::Real(12.34));
}

#[test]
fn test_scaled_null_rules_match_int() {
    assert_eq!(read_scaled(b"    ", 0, 4, 1), FieldValue::Null);
    assert_eq!(read_scaled(b"**", 0, 2, 1), FieldValue::Null);
}

// =============================================================================
// Text extraction
// =============================================================================

#[test]
fn test_text_ascii() {
    assert_eq!(
        read_text(b"TOKYO     ", 0, 10),
        FieldValue::Text("TOKYO".to_string())
    );
}

#[test]
fn test_text_all_spaces_is_null() {
    assert_eq!(read_text(b"          ", 0, 10), FieldValue::Null);
}

#[test]
fn test_text_shift_jis_roundtrip() {
    // "Tokyo" in Shift-JIS (U+6771 U+4EAC)
    let sjis: &[u8] = &[0x93, 0x8c, 0x8b, 0x9e];
    assert_eq!(
        read_text(sjis, 0, 4),
        FieldValue::Text("\u{6771}\u{4eac}".to_string())
    );
}

#[test]
fn test_text_invalid_sequence_preserves_ascii() {
    // 0xFD 0xFE are not valid Shift-JIS lead/trail pairs; the ASCII
    // subsequence around them must survive unchanged.
    let raw: &[u8] = &[b'A', b'B', 0xfd, 0xfe, b'C'];
    let value = read_text(raw, 0, 5);
    let text = value.as_text().expect("text value");
    assert!(text.starts_with("AB"));
    assert!(text.ends_with('C'));
}

#[test]
fn test_lossy_decoding_is_injective_per_byte() {
    let raw: Vec<u8> = (0u8..=255).collect();
    let decoded = read_text_lossy(&raw);
    assert_eq!(decoded.chars().count(), 256);
    // ASCII passes through by value
    assert_eq!(&decoded[..128], std::str::from_utf8(&raw[..128]).unwrap());
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_identical_bytes_identical_values() {
    let buf = b"SE12024060105TOKYO 0035";
    for _ in 0..3 {
        assert_eq!(read_int(buf, 2, 1), FieldValue::Int(1));
        assert_eq!(read_scaled(buf, 19, 4, 1), FieldValue::Real(3.5));
        assert_eq!(
            read_text(buf, 13, 6),
            FieldValue::Text("TOKYO".to_string())
        );
    }
}
