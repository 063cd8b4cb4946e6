//! Umalink Parsers - record layouts and the parser registry
//!
//! Every vendor record is a fixed-length byte sequence whose first two ASCII
//! bytes name its kind (`RA`, `SE`, `O1`, ...). Each kind has exactly one
//! layout: a static table of `(name, offset, length, codec)` entries plus
//! zero or more repeated blocks. Parsing never does I/O and is total - a
//! buffer at least as long as the declared record length always yields rows.
//!
//! # Row expansion
//!
//! Kinds with combinatorial payloads (odds `O1`-`O6`, votes `H1`/`H6`,
//! registrations `TK`, mining `DM`/`TM`, regional payouts `HA`) declare
//! repeated blocks in `Rows` mode: one output row per non-empty element,
//! each carrying the record's base columns. Blocks in `Flatten` mode append
//! numbered columns to the single base row instead (payout hits, lap times).
//!
//! # Feeds
//!
//! The central and regional feeds share all 38 central layouts; the regional
//! feed adds `HA`, `NC`, and `NU`. Lookup is always by `(feed, kind)`.

mod error;
mod layout;
pub mod layouts;
mod record;
mod registry;

pub use error::ParseError;
pub use layout::{BlockMode, BlockSpec, Codec, FieldSpec, RecordLayout};
pub use record::ParsedRecord;
pub use registry::{Feed, ParserRegistry};

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Every record ends with a two-byte CRLF delimiter; declared record lengths
/// include it.
pub const RECORD_DELIMITER_LENGTH: usize = 2;

// Test modules - only compiled during testing
#[cfg(test)]
mod layout_test;
#[cfg(test)]
mod registry_test;
