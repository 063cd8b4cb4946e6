//! Writer error types

use thiserror::Error;

/// Errors surfaced by a database driver
///
/// The writer recovers by error class, never by driver identity: connection
/// loss triggers the reconnect loop, statement errors trigger the per-row
/// fallback, everything else is fatal for the operation.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The connection is gone; reconnecting may help
    #[error("connection lost: {0}")]
    Connection(String),

    /// A statement failed against an open connection
    #[error("statement failed: {0}")]
    Statement(String),

    /// The driver refused the configuration
    #[error("driver configuration invalid: {0}")]
    Config(String),
}

impl DriverError {
    /// True if reopening the connection may clear the error
    pub fn is_connection_lost(&self) -> bool {
        matches!(self, DriverError::Connection(_))
    }
}

/// Errors surfaced by the writer
#[derive(Debug, Error)]
pub enum WriterError {
    /// Underlying driver error after recovery was exhausted
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// The destination table declares no primary key
    #[error("table {0} has no primary key; refusing to write")]
    NoPrimaryKey(String),

    /// A record is missing a primary-key column
    #[error("record for {table} missing key column {column}")]
    MissingKeyColumn { table: String, column: String },

    /// The reconnect loop gave up
    #[error("connection to the database could not be restored after {attempts} attempts: {last}")]
    ReconnectExhausted { attempts: u32, last: String },
}

impl WriterError {
    /// Create a missing-key-column error
    #[inline]
    pub fn missing_key(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingKeyColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Record-local errors are counted, not propagated
    pub fn is_record_local(&self) -> bool {
        matches!(self, WriterError::MissingKeyColumn { .. })
    }
}
