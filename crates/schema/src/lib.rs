//! Umalink Schema - destination tables and routing
//!
//! The schema catalogue is compiled once at startup from the record layouts:
//! every layout contributes its column set, the key tables in `keys` add the
//! primary keys, and the router materialises one `TableDef` per
//! (feed, path, kind) combination. Lookup on the record path is a single
//! `HashMap` probe.
//!
//! # Naming scheme
//!
//! - Accumulated tables: `NL_<kind>` (historical/setup fetches)
//! - Real-time tables: `RT_<kind>` (live-monitor fetches)
//! - Regional feed: same base names with a `_REG` suffix
//!
//! The real-time family reuses the accumulated column definitions; the
//! accumulated table is authoritative where the two overlap.

mod catalogue;
mod error;
mod keys;
mod router;
mod table;

pub use catalogue::realtime_kinds;
pub use error::SchemaError;
pub use keys::primary_key;
pub use router::{Path, TableRouter};
pub use table::{Column, ColumnType, TableDef};

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

// Test modules - only compiled during testing
#[cfg(test)]
mod router_test;
#[cfg(test)]
mod catalogue_test;
