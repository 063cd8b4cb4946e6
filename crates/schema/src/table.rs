//! Table definitions

use std::fmt;

/// Logical column type of a destination column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    BigInt,
    Real,
    Text,
}

impl ColumnType {
    /// SQL type name used when creating tables
    pub const fn sql(self) -> &'static str {
        match self {
            ColumnType::Int => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql())
    }
}

/// One destination column
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

/// Structural definition of one destination table
#[derive(Debug, Clone)]
pub struct TableDef {
    /// Unique table name (`NL_RA`, `RT_O1_REG`, ...)
    name: String,
    /// Record kind that feeds this table
    kind: &'static str,
    /// Ordered column list; the writer binds values in this order
    columns: Vec<Column>,
    /// Non-empty primary key, a subset of `columns`
    primary_key: Vec<String>,
}

impl TableDef {
    pub(crate) fn new(
        name: String,
        kind: &'static str,
        columns: Vec<Column>,
        primary_key: Vec<String>,
    ) -> Self {
        Self {
            name,
            kind,
            columns,
            primary_key,
        }
    }

    /// Table name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record kind this table receives
    #[inline]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Ordered columns
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in declaration order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Primary-key columns
    #[inline]
    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// True if `name` is part of the primary key
    pub fn is_key_column(&self, name: &str) -> bool {
        self.primary_key.iter().any(|k| k == name)
    }

    /// `CREATE TABLE IF NOT EXISTS` statement for this table
    ///
    /// Identifiers are quoted by the caller's driver when executed; the
    /// generated text uses the driver-provided quote function.
    pub fn create_sql(&self, quote: impl Fn(&str) -> String) -> String {
        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{} {}", quote(&c.name), c.ty.sql()))
            .collect();
        let keys: Vec<String> = self.primary_key.iter().map(|k| quote(k)).collect();
        parts.push(format!("PRIMARY KEY ({})", keys.join(", ")));
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote(&self.name),
            parts.join(", ")
        )
    }
}
