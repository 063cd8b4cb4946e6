//! Umalink Codec - field extraction primitives for vendor race-data records
//!
//! Vendor records are fixed-length byte sequences: a two-ASCII-byte record
//! kind at offset 0, a one-byte data class at offset 2, and Shift-JIS encoded
//! text in the body. This crate provides the low-level extractors that every
//! record layout is built from:
//!
//! - `read_int` - ASCII digits with leading spaces/zeroes
//! - `read_scaled` - ASCII integer divided by a declared power of ten
//!   (odds stored ×10, training times ×10, weights ×10)
//! - `read_text` - Shift-JIS text with a byte-preserving fallback so a bad
//!   multi-byte sequence never loses the record
//! - `RecordBuffer` - the byte container handed from the session layer
//!
//! # Design Principles
//!
//! - **Total extraction**: for any buffer at least as long as the layout,
//!   every field yields a value (possibly `Null`). Malformed digits degrade
//!   to `Null`, never to an error for the whole record.
//! - **Deterministic**: identical bytes at identical offsets always produce
//!   identical typed values.

mod buffer;
mod error;
mod extract;
mod value;

pub use buffer::RecordBuffer;
pub use error::CodecError;
pub use extract::{read_int, read_scaled, read_text, read_text_lossy};
pub use value::FieldValue;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Length of the record-kind tag at the head of every record
pub const KIND_TAG_LENGTH: usize = 2;

/// Offset of the one-byte data-class tag
pub const DATA_CLASS_OFFSET: usize = 2;

// Test modules - only compiled during testing
#[cfg(test)]
mod extract_test;
