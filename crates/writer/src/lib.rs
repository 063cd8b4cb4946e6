//! Umalink Writer - batched upserts into the destination database
//!
//! The writer accepts parsed records one at a time, groups them by
//! destination table into per-table batch buffers, and flushes each batch as
//! one transaction: `begin → bulk upsert → commit`. A failed batch rolls
//! back and falls back to row-at-a-time retries so one poisoned row costs
//! one row, not a thousand.
//!
//! # Drivers
//!
//! The database engine sits behind the [`Driver`] trait: an embedded
//! single-file engine ([`TursoDriver`], dialect `INSERT OR REPLACE`), a
//! client-server engine ([`PostgresDriver`], dialect `ON CONFLICT … DO
//! UPDATE`), and an in-memory engine ([`MemoryDriver`]) for tests and dry
//! runs. The writer never branches on which driver it holds - identifier
//! quoting and the upsert dialect are driver capabilities.
//!
//! # Invariants
//!
//! - A table without a primary key is refused outright.
//! - A record missing any primary-key column is rejected (counted failed),
//!   never silently inserted.
//! - Batches never mix destination tables.
//! - Writing the same record twice leaves exactly one row.

mod batch;
mod driver;
mod error;
mod memory;
mod postgres;
mod turso_driver;
mod writer;

pub use batch::{BatchBuffer, FlushOutcome};
pub use driver::{needs_quoting, Driver};
pub use error::{DriverError, WriterError};
pub use memory::{MemoryDriver, MemoryState};
pub use postgres::{PostgresConfig, PostgresDriver};
pub use turso_driver::TursoDriver;
pub use writer::{Writer, WriterConfig};

/// Result type for writer operations
pub type Result<T> = std::result::Result<T, WriterError>;

/// Default rows per batch before a flush
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Reconnection attempts before a lost connection becomes fatal
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;

#[cfg(test)]
mod writer_test;
