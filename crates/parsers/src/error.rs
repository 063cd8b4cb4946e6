//! Parser error types

use thiserror::Error;

/// Errors that can occur when parsing a record buffer
#[derive(Debug, Error)]
pub enum ParseError {
    /// The two-byte kind tag is not registered for the active feed
    #[error("unknown record kind {kind:?} for feed {feed}")]
    UnknownKind { kind: String, feed: &'static str },

    /// Buffer is shorter than the layout's declared record length
    #[error("record {kind} too short: layout is {expected} bytes, got {actual}")]
    BufferTooShort {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The kind tag could not be read at all
    #[error("unreadable kind tag: {0}")]
    BadKindTag(#[from] umalink_codec::CodecError),

    /// A declared field could not be converted
    ///
    /// Extraction itself is total; this only fires for structural problems
    /// (a block whose declared region exceeds the record length).
    #[error("field conversion failed for {kind}.{field}: {reason}")]
    FieldConversionFailed {
        kind: &'static str,
        field: &'static str,
        reason: String,
    },
}

impl ParseError {
    /// Create an unknown-kind error
    #[inline]
    pub fn unknown_kind(kind: impl Into<String>, feed: &'static str) -> Self {
        Self::UnknownKind {
            kind: kind.into(),
            feed,
        }
    }

    /// Create a buffer-too-short error
    #[inline]
    pub fn too_short(kind: &'static str, expected: usize, actual: usize) -> Self {
        Self::BufferTooShort {
            kind,
            expected,
            actual,
        }
    }

    /// Parser errors never abort a run; they are counted per record
    pub fn is_record_local(&self) -> bool {
        true
    }
}
