//! Record layout model and the parse engine
//!
//! A layout is data, not code: a static table of scalar fields plus repeated
//! blocks. The engine walks the tables, so every kind parses through the same
//! few code paths and a layout mistake is a table edit, not a logic change.

use umalink_codec::{read_int, read_scaled, read_text, FieldValue};

use crate::{ParseError, ParsedRecord, Result};

/// How a field's bytes convert to a typed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// ASCII digits → integer
    Int,
    /// ASCII digits with an implicit decimal scale → real
    /// (`Scaled(1)` turns `"0035"` into `3.5`)
    Scaled(u8),
    /// Shift-JIS text, trailing spaces trimmed
    Text,
}

/// One fixed-offset field
///
/// `offset` is absolute for layout-level fields and element-relative for
/// block fields.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: usize,
    pub length: usize,
    pub codec: Codec,
}

/// Shorthand constructors used by the layout tables
pub const fn text(name: &'static str, offset: usize, length: usize) -> FieldSpec {
    FieldSpec {
        name,
        offset,
        length,
        codec: Codec::Text,
    }
}

pub const fn int(name: &'static str, offset: usize, length: usize) -> FieldSpec {
    FieldSpec {
        name,
        offset,
        length,
        codec: Codec::Int,
    }
}

pub const fn scaled(name: &'static str, offset: usize, length: usize, scale: u8) -> FieldSpec {
    FieldSpec {
        name,
        offset,
        length,
        codec: Codec::Scaled(scale),
    }
}

/// What a repeated block contributes to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMode {
    /// One output row per non-empty element (combination tables). Rows from
    /// every `Rows` block of the layout merge by element index, so a layout
    /// with per-horse win odds and per-horse place odds yields one row per
    /// horse carrying both.
    Rows,
    /// Element fields appended to the single base row with 1-based numeric
    /// suffixes (`TansyoPay1`, `TansyoPay2`, ...)
    Flatten,
}

/// A fixed-length element repeated `count` times
#[derive(Debug, Clone, Copy)]
pub struct BlockSpec {
    /// Prefix applied to element field names (`""` for none)
    pub prefix: &'static str,
    /// Absolute offset of the first element
    pub offset: usize,
    /// Element width in bytes
    pub width: usize,
    /// Number of elements
    pub count: usize,
    /// Element fields, offsets relative to the element start
    pub fields: &'static [FieldSpec],
    pub mode: BlockMode,
}

impl BlockSpec {
    /// Absolute end of the block
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.width * self.count
    }
}

/// The complete layout of one record kind
#[derive(Debug)]
pub struct RecordLayout {
    /// Two-ASCII-byte kind tag
    pub kind: &'static str,
    /// Declared record length, trailing CRLF included
    pub length: usize,
    /// Scalar fields at absolute offsets
    pub fields: &'static [FieldSpec],
    /// Repeated blocks
    pub blocks: &'static [BlockSpec],
}

impl RecordLayout {
    /// Parse one record buffer into output rows
    ///
    /// Layouts without `Rows` blocks produce exactly one row. Layouts with
    /// `Rows` blocks produce one row per non-empty element; a record whose
    /// blocks are entirely padding still produces the base row so the race
    /// header is never lost.
    ///
    /// # Errors
    ///
    /// `BufferTooShort` when the buffer is shorter than the declared length.
    pub fn parse(&self, buf: &[u8]) -> Result<Vec<ParsedRecord>> {
        if buf.len() < self.length {
            return Err(ParseError::too_short(self.kind, self.length, buf.len()));
        }

        let mut base = ParsedRecord::with_capacity(self.kind, self.fields.len());
        for field in self.fields {
            base.push(field.name, extract(buf, field, field.offset));
        }

        for block in self.blocks.iter().filter(|b| b.mode == BlockMode::Flatten) {
            self.flatten_block(buf, block, &mut base);
        }

        let row_blocks: Vec<&BlockSpec> = self
            .blocks
            .iter()
            .filter(|b| b.mode == BlockMode::Rows)
            .collect();

        if row_blocks.is_empty() {
            return Ok(vec![base]);
        }

        let rows = self.expand_rows(buf, &row_blocks, &base);
        if rows.is_empty() {
            // All elements were padding; keep the header row
            Ok(vec![base])
        } else {
            Ok(rows)
        }
    }

    /// Append a `Flatten` block's elements to the base row
    fn flatten_block(&self, buf: &[u8], block: &BlockSpec, base: &mut ParsedRecord) {
        for index in 0..block.count {
            let element = block.offset + index * block.width;
            for field in block.fields {
                let name = format!("{}{}{}", block.prefix, field.name, index + 1);
                base.push(name, extract(buf, field, element + field.offset));
            }
        }
    }

    /// Merge all `Rows` blocks by element index into output rows
    fn expand_rows(
        &self,
        buf: &[u8],
        blocks: &[&BlockSpec],
        base: &ParsedRecord,
    ) -> Vec<ParsedRecord> {
        let max_count = blocks.iter().map(|b| b.count).max().unwrap_or(0);
        let mut rows = Vec::new();

        for index in 0..max_count {
            let mut row = base.clone();
            let mut live = false;

            for block in blocks.iter().filter(|b| index < b.count) {
                let element = block.offset + index * block.width;
                for field in block.fields {
                    let value = extract(buf, field, element + field.offset);
                    if !value.is_null() {
                        live = true;
                    }
                    let name = if block.prefix.is_empty() {
                        field.name.to_string()
                    } else {
                        format!("{}{}", block.prefix, field.name)
                    };
                    row.push(name, value);
                }
            }

            if live && !element_is_padding(&row, blocks) {
                rows.push(row);
            }
        }

        rows
    }

    /// Total number of columns one row of this layout carries
    pub fn column_count(&self) -> usize {
        let flat: usize = self
            .blocks
            .iter()
            .filter(|b| b.mode == BlockMode::Flatten)
            .map(|b| b.count * b.fields.len())
            .sum();
        let rows: usize = self
            .blocks
            .iter()
            .filter(|b| b.mode == BlockMode::Rows)
            .map(|b| b.fields.len())
            .sum();
        self.fields.len() + flat + rows
    }
}

/// Extract one field at an absolute offset
fn extract(buf: &[u8], field: &FieldSpec, offset: usize) -> FieldValue {
    match field.codec {
        Codec::Int => read_int(buf, offset, field.length),
        Codec::Scaled(scale) => read_scaled(buf, offset, field.length, scale),
        Codec::Text => read_text(buf, offset, field.length),
    }
}

/// An element whose key field decodes to zero is an unused slot
///
/// Vendor records pad unused combination slots with zeroes ("00", "0000"),
/// which parse as `Int(0)` / `Text("0...")` rather than `Null`. The first
/// field of the first block is the element key by convention.
fn element_is_padding(row: &ParsedRecord, blocks: &[&BlockSpec]) -> bool {
    let Some(first_block) = blocks.first() else {
        return false;
    };
    let Some(key_field) = first_block.fields.first() else {
        return false;
    };
    let name = if first_block.prefix.is_empty() {
        key_field.name.to_string()
    } else {
        format!("{}{}", first_block.prefix, key_field.name)
    };
    match row.get(&name) {
        Some(FieldValue::Int(0)) | Some(FieldValue::Null) | None => true,
        Some(FieldValue::Text(t)) => t.bytes().all(|b| b == b'0' || b == b'-' || b == b'*'),
        _ => false,
    }
}
