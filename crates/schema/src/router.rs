//! Table router - (feed, path, kind) → destination table

use std::collections::HashMap;

use umalink_parsers::{layouts, Feed, RecordLayout};

use crate::catalogue::{build_table, realtime_kinds};
use crate::table::TableDef;
use crate::{Result, SchemaError};

/// Which ingestion path delivered a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Path {
    /// Historical / setup fetches → `NL_*` tables
    Accumulated,
    /// Live-monitor fetches → `RT_*` tables
    RealTime,
}

impl Path {
    /// Table-name prefix for this path
    #[inline]
    pub const fn prefix(self) -> &'static str {
        match self {
            Path::Accumulated => "NL_",
            Path::RealTime => "RT_",
        }
    }

    /// Stable lowercase name for logs
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Path::Accumulated => "accumulated",
            Path::RealTime => "realtime",
        }
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pre-compiled destination catalogue
///
/// Built once at startup; `route()` and `schema()` are map probes on the
/// record path, no allocation. The build validates that every destination
/// has a primary key whose columns the owning layout actually produces.
#[derive(Debug)]
pub struct TableRouter {
    /// (feed, path) → kind → table name
    routes: HashMap<(Feed, Path), HashMap<String, String>>,
    /// table name → definition
    tables: HashMap<String, TableDef>,
}

impl TableRouter {
    /// Compile the full catalogue
    ///
    /// # Errors
    ///
    /// Fails when any kind lacks a primary-key declaration or declares a key
    /// column its layout does not produce. A keyless table must never ship.
    pub fn new() -> Result<Self> {
        let mut routes: HashMap<(Feed, Path), HashMap<String, String>> = HashMap::new();
        let mut tables = HashMap::new();

        for feed in [Feed::Central, Feed::Regional] {
            let kind_set: Vec<&'static RecordLayout> = match feed {
                Feed::Central => layouts::CENTRAL.to_vec(),
                Feed::Regional => layouts::CENTRAL
                    .iter()
                    .chain(layouts::REGIONAL_ONLY.iter())
                    .copied()
                    .collect(),
            };

            for layout in kind_set {
                for path in [Path::Accumulated, Path::RealTime] {
                    if path == Path::RealTime && !realtime_kinds(layout.kind) {
                        continue;
                    }
                    let name = table_name(feed, path, layout.kind);
                    if !tables.contains_key(&name) {
                        let def = build_table(name.clone(), layout)?;
                        tables.insert(name.clone(), def);
                    }
                    routes
                        .entry((feed, path))
                        .or_default()
                        .insert(layout.kind.to_string(), name);
                }
            }
        }

        Ok(Self { routes, tables })
    }

    /// Resolve the destination table for a record kind
    ///
    /// # Errors
    ///
    /// `NoDestination` when the kind does not flow on that (feed, path).
    pub fn route(&self, feed: Feed, path: Path, kind: &str) -> Result<&TableDef> {
        self.routes
            .get(&(feed, path))
            .and_then(|kinds| kinds.get(kind))
            .and_then(|name| self.tables.get(name))
            .ok_or_else(|| SchemaError::NoDestination {
                kind: kind.to_string(),
                feed: feed.as_str(),
                path: path.as_str(),
            })
    }

    /// Look up a table definition by name
    pub fn schema(&self, table_name: &str) -> Option<&TableDef> {
        self.tables.get(table_name)
    }

    /// All table definitions, for schema initialisation
    pub fn tables(&self) -> impl Iterator<Item = &TableDef> {
        self.tables.values()
    }

    /// Number of distinct destination tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

/// Destination table name for one (feed, path, kind)
fn table_name(feed: Feed, path: Path, kind: &str) -> String {
    match feed {
        Feed::Central => format!("{}{}", path.prefix(), kind),
        Feed::Regional => format!("{}{}_REG", path.prefix(), kind),
    }
}
