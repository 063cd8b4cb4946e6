//! Record buffer container

use bytes::Bytes;

use crate::{CodecError, Result, KIND_TAG_LENGTH};

/// One vendor record as delivered by the session layer
///
/// Wraps the raw bytes together with the name of the vendor file the record
/// came from (needed for the skip-files bookkeeping and for damaged-file
/// recovery). `Bytes` keeps the clone cheap on the session→writer channel.
#[derive(Debug, Clone)]
pub struct RecordBuffer {
    data: Bytes,
    file_name: String,
}

impl RecordBuffer {
    /// Wrap raw record bytes
    pub fn new(data: impl Into<Bytes>, file_name: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            file_name: file_name.into(),
        }
    }

    /// The raw bytes, trailing CRLF included if the vendor sent one
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Record length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the buffer is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Source file this record was read from
    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The two-ASCII-byte record kind at offset 0
    ///
    /// # Errors
    ///
    /// Returns `InvalidKindTag` when the first two bytes are not printable
    /// ASCII, and `BufferTooShort` when fewer than two bytes are present.
    pub fn kind(&self) -> Result<&str> {
        if self.data.len() < KIND_TAG_LENGTH {
            return Err(CodecError::too_short(KIND_TAG_LENGTH, self.data.len()));
        }
        let tag = &self.data[..KIND_TAG_LENGTH];
        if !tag.iter().all(|b| b.is_ascii_alphanumeric()) {
            return Err(CodecError::InvalidKindTag([tag[0], tag[1]]));
        }
        std::str::from_utf8(tag).map_err(|_| CodecError::InvalidKindTag([tag[0], tag[1]]))
    }

    /// The one-byte data-class tag at offset 2, if present
    #[inline]
    pub fn data_class(&self) -> Option<u8> {
        self.data.get(crate::DATA_CLASS_OFFSET).copied()
    }
}
