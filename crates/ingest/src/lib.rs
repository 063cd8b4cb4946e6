//! Umalink Ingest - the coordinator
//!
//! Composes session manager, parser registry, table router, and writer into
//! the two public workflows:
//!
//! - **Historical backfill**: split a date range into chunks, run one vendor
//!   session per chunk (`option = setup`), parse/route/filter/write every
//!   record, persist progress for resumption.
//! - **Live monitor**: poll the real-time stream on a cadence, upsert into
//!   the real-time table family, and expose a small local HTTP surface for
//!   status and manual triggers.
//!
//! # Pipeline shape
//!
//! One session worker produces `RecordBuffer`s into a bounded channel; one
//! parse-and-write worker drains it. A single writer suffices because the
//! database transaction is the bottleneck, and a single consumer keeps the
//! vendor's delivery order intact all the way to the batch buffers.
//!
//! # Process isolation
//!
//! The vendor component leaks over long runs, so backfill can host each
//! chunk's session in a short-lived worker process. The child's entire
//! contract is one JSON result line on stdout (see [`worker`]).

mod backfill;
mod coordinator;
mod error;
mod http;
mod monitor;
mod resume;
mod stats;
pub mod worker;

pub use backfill::{chunk_range, BackfillRequest, DateChunk};
pub use coordinator::{Coordinator, SessionFactory};
pub use error::{IngestError, RunResult, RunStatus};
pub use http::{serve_control, ControlHandle, Trigger};
pub use monitor::{Monitor, MonitorConfig};
pub use resume::ResumeState;
pub use stats::{ProgressEvent, RunStats, StatsSnapshot};

/// Result type for ingest operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Bounded capacity of the session → writer record channel
pub const RECORD_CHANNEL_CAPACITY: usize = 1000;

/// Default port of the local control surface
pub const DEFAULT_CONTROL_PORT: u16 = 8765;
