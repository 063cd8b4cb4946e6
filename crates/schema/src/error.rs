//! Schema error types

use thiserror::Error;

/// Errors raised while compiling or consulting the schema catalogue
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A table would be created without a primary key; shipping such a table
    /// would make upserts meaningless, so the catalogue build refuses.
    #[error("table {table} has no primary key declared for kind {kind}")]
    MissingPrimaryKey { table: String, kind: &'static str },

    /// A declared primary-key column does not exist in the layout's output
    #[error("table {table}: primary-key column {column} not produced by kind {kind}")]
    UnknownKeyColumn {
        table: String,
        kind: &'static str,
        column: &'static str,
    },

    /// Routing request for a kind the catalogue does not know
    #[error("no destination for kind {kind} on feed {feed} ({path} path)")]
    NoDestination {
        kind: String,
        feed: &'static str,
        path: &'static str,
    },
}
