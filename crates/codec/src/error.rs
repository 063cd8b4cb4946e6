//! Codec error types

use thiserror::Error;

/// Errors that can occur while extracting fields from a record buffer
#[derive(Debug, Error)]
pub enum CodecError {
    /// Buffer is shorter than the layout's declared length
    #[error("buffer too short: layout needs {expected} bytes, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    /// Record-kind tag is not two ASCII bytes
    #[error("invalid record kind tag: {0:?}")]
    InvalidKindTag([u8; 2]),

    /// A field range falls outside the buffer
    #[error("field {field} out of bounds: {offset}+{length} exceeds buffer of {buffer_len}")]
    FieldOutOfBounds {
        field: &'static str,
        offset: usize,
        length: usize,
        buffer_len: usize,
    },
}

impl CodecError {
    /// Create a buffer-too-short error
    #[inline]
    pub fn too_short(expected: usize, actual: usize) -> Self {
        Self::BufferTooShort { expected, actual }
    }

    /// Create a field-out-of-bounds error
    #[inline]
    pub fn out_of_bounds(
        field: &'static str,
        offset: usize,
        length: usize,
        buffer_len: usize,
    ) -> Self {
        Self::FieldOutOfBounds {
            field,
            offset,
            length,
            buffer_len,
        }
    }
}
