//! Parsed record representation

use umalink_codec::FieldValue;

/// One output row produced by a parser
///
/// Column names are unique within a record (layouts suffix duplicated source
/// names at declaration time). Insertion order is preserved for debugging,
/// but the writer consults the schema for column order at flush time, so the
/// order here carries no meaning.
#[derive(Debug, Clone)]
pub struct ParsedRecord {
    kind: &'static str,
    columns: Vec<(String, FieldValue)>,
}

impl ParsedRecord {
    /// Create a record for the given kind
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            columns: Vec::new(),
        }
    }

    /// Create a record with pre-allocated column capacity
    pub fn with_capacity(kind: &'static str, capacity: usize) -> Self {
        Self {
            kind,
            columns: Vec::with_capacity(capacity),
        }
    }

    /// The record kind this row was parsed from
    #[inline]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Append a column; replaces any existing column of the same name
    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        if let Some(slot) = self.columns.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.columns.push((name, value));
        }
    }

    /// Look up a column by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// All columns in insertion order
    #[inline]
    pub fn columns(&self) -> &[(String, FieldValue)] {
        &self.columns
    }

    /// Number of columns
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if no columns were extracted
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// True if every named column is present and non-null
    pub fn has_all(&self, names: &[&str]) -> bool {
        names
            .iter()
            .all(|n| self.get(n).map(|v| !v.is_null()).unwrap_or(false))
    }
}
