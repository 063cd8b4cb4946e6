//! Umalink Session - driving one vendor session through its state machine
//!
//! The vendor component is an opaque in-process object with a narrow call
//! surface (initialise / open / status / read_record / file_delete / close)
//! and a documented vocabulary of numeric result codes. This crate wraps it
//! in a [`SessionManager`] that owns exactly one session object, walks the
//! download/read state machine, and translates result codes into a small set
//! of reactions:
//!
//! - recoverable data damage (`-402`/`-403`) → delete the file, keep reading
//! - transport trouble (`-203`/`-421`/`-502`/`-503`, stalls, timeouts) →
//!   bounded retry with the skip-files set carried across reopen attempts
//! - auth/config trouble (`-100`/`-116`/`-301`) → fatal with a remedy hint
//!
//! The manager is generic over [`VendorSession`], so tests drive a scripted
//! stub and production drives the platform bridge object.

mod bridge;
mod codes;
mod error;
mod manager;
mod policy;
mod skip;
mod state;
mod stub;
mod vendor;

pub use bridge::{BridgeConfig, BridgeSession, BRIDGE_TRANSPORT_ERROR};
pub use codes::{code, ReadReaction, StatusReaction};
pub use error::SessionError;
pub use manager::{FetchSummary, SessionConfig, SessionManager};
pub use policy::FeedPolicy;
pub use skip::SkipFiles;
pub use state::SessionState;
pub use stub::{CallLog, ReadStep, ScriptedSession};
pub use vendor::{OpenReply, ReadReply, RtOpenReply, VendorSession};

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Read buffer handed to the vendor per record
pub const READ_BUFFER_SIZE: usize = 50_000;

/// Iteration ceiling of one session's read loop
pub const READ_LOOP_BUDGET: u32 = 100_000;

// Test modules - only compiled during testing
#[cfg(test)]
mod codes_test;
#[cfg(test)]
mod manager_test;
