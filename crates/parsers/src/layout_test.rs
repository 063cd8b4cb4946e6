//! Tests for the layout parse engine
//!
//! Uses a synthetic layout so the engine's behaviour is visible without the
//! bulk of a real record.

use umalink_codec::FieldValue;

use crate::layout::{int, scaled, text, BlockMode, BlockSpec, RecordLayout};

/// 40-byte test record: header, one flattened pair, one row block
static TEST: RecordLayout = RecordLayout {
    kind: "ZZ",
    length: 40,
    fields: &[
        text("RecordSpec", 0, 2),
        int("RaceNum", 2, 2),
        scaled("Odds", 4, 4, 1),
    ],
    blocks: &[
        BlockSpec {
            prefix: "Pay",
            offset: 8,
            width: 4,
            count: 2,
            fields: &[int("Amount", 0, 4)],
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "",
            offset: 16,
            width: 8,
            count: 3,
            fields: &[int("Umaban", 0, 2), scaled("Kakeritsu", 2, 6, 1)],
            mode: BlockMode::Rows,
        },
    ],
};

fn buffer(rows: &[&[u8; 8]]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(40);
    buf.extend_from_slice(b"ZZ");
    buf.extend_from_slice(b"07");
    buf.extend_from_slice(b"0035");
    buf.extend_from_slice(b"0100");
    buf.extend_from_slice(b"0250");
    for row in rows {
        buf.extend_from_slice(*row);
    }
    buf.resize(40, b' ');
    buf
}

#[test]
fn test_too_short_is_rejected() {
    let err = TEST.parse(b"ZZ07").unwrap_err();
    assert!(matches!(
        err,
        crate::ParseError::BufferTooShort {
            kind: "ZZ",
            expected: 40,
            ..
        }
    ));
}

#[test]
fn test_base_fields_and_flatten_suffixes() {
    let buf = buffer(&[b"01000015", b"02000230", b"03000017"]);
    let rows = TEST.parse(&buf).unwrap();
    let first = &rows[0];

    assert_eq!(first.get("RecordSpec"), Some(&FieldValue::Text("ZZ".into())));
    assert_eq!(first.get("RaceNum"), Some(&FieldValue::Int(7)));
    assert_eq!(first.get("Odds"), Some(&FieldValue::Real(3.5)));
    assert_eq!(first.get("PayAmount1"), Some(&FieldValue::Int(100)));
    assert_eq!(first.get("PayAmount2"), Some(&FieldValue::Int(250)));
}

#[test]
fn test_rows_expansion() {
    let buf = buffer(&[b"01000015", b"02000230", b"03000017"]);
    let rows = TEST.parse(&buf).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].get("Umaban"), Some(&FieldValue::Int(1)));
    assert_eq!(rows[0].get("Kakeritsu"), Some(&FieldValue::Real(1.5)));
    assert_eq!(rows[2].get("Umaban"), Some(&FieldValue::Int(3)));
    // Every row carries the base columns
    for row in &rows {
        assert_eq!(row.get("RaceNum"), Some(&FieldValue::Int(7)));
    }
}

#[test]
fn test_padding_elements_are_skipped() {
    // Second element is zero-padded, third is spaces: both dropped
    let buf = buffer(&[b"01000015", b"00000000", b"        "]);
    let rows = TEST.parse(&buf).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("Umaban"), Some(&FieldValue::Int(1)));
}

#[test]
fn test_all_padding_keeps_base_row() {
    let buf = buffer(&[b"        ", b"        ", b"        "]);
    let rows = TEST.parse(&buf).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("RaceNum"), Some(&FieldValue::Int(7)));
    // No element columns on the fallback header row
    assert_eq!(rows[0].get("Umaban"), None);
}

#[test]
fn test_parse_is_deterministic() {
    let buf = buffer(&[b"01000015", b"02000230", b"        "]);
    let a = TEST.parse(&buf).unwrap();
    let b = TEST.parse(&buf).unwrap();

    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.columns(), y.columns());
    }
}

#[test]
fn test_column_count_accounts_for_blocks() {
    // 3 base + 1 field x 2 flattened + 2 row fields
    assert_eq!(TEST.column_count(), 3 + 2 + 2);
}
