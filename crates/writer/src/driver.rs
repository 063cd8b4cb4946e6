//! Database driver trait

use async_trait::async_trait;
use umalink_codec::FieldValue;

use crate::DriverError;

/// Capability set the writer relies on
///
/// One implementation per engine. The writer composes these calls; it never
/// emits engine-specific SQL itself. Identifier quoting and the upsert
/// dialect are declared here so the writer code stays engine-agnostic.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Engine name for logs ("turso", "postgres", "memory")
    fn name(&self) -> &'static str;

    /// Execute a statement, returning rows affected
    async fn exec(&mut self, sql: &str, params: &[FieldValue]) -> Result<u64, DriverError>;

    /// Execute one statement for every parameter row (batch flush path)
    async fn bulk_exec(
        &mut self,
        sql: &str,
        param_rows: &[Vec<FieldValue>],
    ) -> Result<u64, DriverError>;

    /// Run a query, returning all rows as (column, value) maps
    async fn query(
        &mut self,
        sql: &str,
        params: &[FieldValue],
    ) -> Result<Vec<Vec<(String, FieldValue)>>, DriverError>;

    /// Open a transaction
    async fn begin(&mut self) -> Result<(), DriverError>;

    /// Commit the open transaction
    async fn commit(&mut self) -> Result<(), DriverError>;

    /// Roll back the open transaction
    async fn rollback(&mut self) -> Result<(), DriverError>;

    /// Re-establish the connection after a loss
    async fn reconnect(&mut self) -> Result<(), DriverError>;

    /// Release the connection
    async fn close(&mut self) -> Result<(), DriverError>;

    /// Quote an identifier for this engine
    ///
    /// Implementations must quote any name that is not a plain ASCII
    /// alphabetic identifier; see [`needs_quoting`].
    fn quote_identifier(&self, name: &str) -> String;

    /// Produce the engine's insert-or-replace statement
    ///
    /// `columns` is the full bind order; `pk_columns` names the conflict
    /// target where the dialect needs one.
    fn upsert_template(&self, table: &str, columns: &[&str], pk_columns: &[&str]) -> String;
}

/// True if an identifier must be quoted in generated SQL
///
/// Plain ASCII-alphabetic names (underscores allowed) pass unquoted;
/// anything with digits, non-ASCII bytes, or other characters must be
/// quoted. Column names in the vendor schema routinely embed digits
/// (`LapTime1`, `Jyuni3c`), so in practice most columns quote.
pub fn needs_quoting(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '_')
}

/// Standard double-quote identifier quoting shared by both SQL engines
pub(crate) fn quote_double(name: &str) -> String {
    if needs_quoting(name) {
        format!("\"{}\"", name.replace('"', "\"\""))
    } else {
        name.to_string()
    }
}
