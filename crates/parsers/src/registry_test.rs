//! Tests for the parser registry

use umalink_codec::RecordBuffer;

use crate::{Feed, ParseError, ParserRegistry};

fn blank_record(kind: &str, length: usize) -> RecordBuffer {
    let mut buf = vec![b' '; length];
    buf[..2].copy_from_slice(kind.as_bytes());
    RecordBuffer::new(buf, "TEST.dat")
}

#[test]
fn test_central_has_38_kinds() {
    let registry = ParserRegistry::new();
    assert_eq!(registry.kinds(Feed::Central).len(), 38);
}

#[test]
fn test_regional_adds_three_kinds() {
    let registry = ParserRegistry::new();
    assert_eq!(registry.kinds(Feed::Regional).len(), 41);
    for kind in ["HA", "NC", "NU"] {
        assert!(registry.layout(Feed::Regional, kind).is_some());
        assert!(registry.layout(Feed::Central, kind).is_none());
    }
}

#[test]
fn test_shared_kinds_use_one_layout_instance() {
    let registry = ParserRegistry::new();
    let central = registry.layout(Feed::Central, "RA").unwrap();
    let regional = registry.layout(Feed::Regional, "RA").unwrap();
    assert!(std::ptr::eq(central, regional));
}

#[test]
fn test_unknown_kind() {
    let registry = ParserRegistry::new();
    let record = blank_record("QQ", 100);
    let err = registry.parse(Feed::Central, &record).unwrap_err();
    assert!(matches!(err, ParseError::UnknownKind { .. }));
}

#[test]
fn test_parse_routes_to_layout() {
    let registry = ParserRegistry::new();
    let layout = registry.layout(Feed::Central, "WE").unwrap();
    let record = blank_record("WE", layout.length);
    let rows = registry.parse(Feed::Central, &record).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind(), "WE");
}

#[test]
fn test_short_buffer_is_rejected() {
    let registry = ParserRegistry::new();
    let record = blank_record("RA", 100);
    let err = registry.parse(Feed::Central, &record).unwrap_err();
    assert!(matches!(err, ParseError::BufferTooShort { .. }));
}
