//! Per-table batch buffers

use umalink_codec::FieldValue;
use umalink_parsers::ParsedRecord;
use umalink_schema::TableDef;

use crate::{Result, WriterError};

/// Accumulates rows bound for one destination table
///
/// Rows are stored in the table's declared column order so one upsert
/// template serves every row of the batch. A batch never mixes tables.
#[derive(Debug)]
pub struct BatchBuffer {
    table: TableDef,
    rows: Vec<Vec<FieldValue>>,
}

impl BatchBuffer {
    /// Create a buffer for a table
    ///
    /// # Errors
    ///
    /// Refuses a table without a primary key.
    pub fn new(table: TableDef, capacity: usize) -> Result<Self> {
        if table.primary_key().is_empty() {
            return Err(WriterError::NoPrimaryKey(table.name().to_string()));
        }
        Ok(Self {
            table,
            rows: Vec::with_capacity(capacity),
        })
    }

    /// The destination table
    #[inline]
    pub fn table(&self) -> &TableDef {
        &self.table
    }

    /// Rows currently buffered
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if nothing is buffered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bind a parsed record into the batch
    ///
    /// Values are laid out in the table's column order; columns the record
    /// does not carry become `Null`.
    ///
    /// # Errors
    ///
    /// `MissingKeyColumn` when any primary-key column is absent or null -
    /// such a record must be counted failed, not inserted.
    pub fn push(&mut self, record: &ParsedRecord) -> Result<()> {
        for key in self.table.primary_key() {
            match record.get(key) {
                Some(value) if !value.is_null() => {}
                _ => return Err(WriterError::missing_key(self.table.name(), key)),
            }
        }

        let row = self
            .table
            .columns()
            .iter()
            .map(|column| {
                record
                    .get(&column.name)
                    .cloned()
                    .unwrap_or(FieldValue::Null)
            })
            .collect();
        self.rows.push(row);
        Ok(())
    }

    /// Take the buffered rows, leaving the buffer empty
    pub fn take_rows(&mut self) -> Vec<Vec<FieldValue>> {
        std::mem::take(&mut self.rows)
    }
}

/// Result of flushing one batch
#[derive(Debug, Default, Clone)]
pub struct FlushOutcome {
    /// Destination table
    pub table: String,
    /// Rows committed
    pub imported: u64,
    /// Rows that failed even the per-row fallback
    pub failed: u64,
    /// Key tuples of the failed rows
    pub failed_keys: Vec<Vec<String>>,
}
