//! In-memory driver for tests and dry runs
//!
//! Implements real upsert semantics over a `HashMap` keyed by the primary
//! key. The upsert template is a private text format (`MEMUPSERT
//! table|col,col|key,key`) that `bulk_exec`/`exec` parse back, so the writer
//! exercises the same template-then-execute path it uses against SQL
//! engines.
//!
//! State lives behind a cloneable [`MemoryState`] handle: tests keep a
//! handle for assertions and failure injection while the writer owns the
//! driver.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use umalink_codec::FieldValue;

use crate::driver::{quote_double, Driver};
use crate::DriverError;

/// Stored table state: key tuple → row values in template column order
type Table = HashMap<Vec<String>, Vec<FieldValue>>;

#[derive(Default)]
struct Inner {
    /// Committed state
    tables: HashMap<String, Table>,
    /// Uncommitted state while a transaction is open
    staged: Option<HashMap<String, Table>>,
    /// Rows that raise a statement error on insert, keyed by (table, key)
    poisoned: Vec<(String, Vec<String>)>,
    /// Fail the next N statements with a connection error
    drop_connection_for: u32,
    /// Statements executed, for assertions
    statements: u64,
}

/// Shared, inspectable store state
#[derive(Clone, Default)]
pub struct MemoryState(Arc<Mutex<Inner>>);

impl MemoryState {
    /// Make inserting the row with this key into `table` fail
    pub fn poison(&self, table: impl Into<String>, key: Vec<String>) {
        self.0.lock().unwrap().poisoned.push((table.into(), key));
    }

    /// Clear all injected row failures
    pub fn heal(&self) {
        self.0.lock().unwrap().poisoned.clear();
    }

    /// Fail the next `n` statements with a connection error
    pub fn drop_connection(&self, n: u32) {
        self.0.lock().unwrap().drop_connection_for = n;
    }

    /// Number of committed rows in a table
    pub fn row_count(&self, table: &str) -> usize {
        self.0
            .lock()
            .unwrap()
            .tables
            .get(table)
            .map(Table::len)
            .unwrap_or(0)
    }

    /// Fetch a committed row by key
    pub fn row(&self, table: &str, key: &[String]) -> Option<Vec<FieldValue>> {
        self.0.lock().unwrap().tables.get(table)?.get(key).cloned()
    }

    /// Total statements executed
    pub fn statement_count(&self) -> u64 {
        self.0.lock().unwrap().statements
    }
}

/// In-memory upsert store
#[derive(Default)]
pub struct MemoryDriver {
    state: MemoryState,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for assertions and failure injection
    pub fn state(&self) -> MemoryState {
        self.state.clone()
    }

    fn check_gate(inner: &mut Inner) -> Result<(), DriverError> {
        inner.statements += 1;
        if inner.drop_connection_for > 0 {
            inner.drop_connection_for -= 1;
            return Err(DriverError::Connection("simulated drop".to_string()));
        }
        Ok(())
    }

    fn apply(inner: &mut Inner, sql: &str, params: &[FieldValue]) -> Result<u64, DriverError> {
        let template = Template::parse(sql)?;
        let key = template.key_of(params)?;
        if inner
            .poisoned
            .iter()
            .any(|(t, k)| *t == template.table && *k == key)
        {
            return Err(DriverError::Statement(format!(
                "constraint violation on {} key {:?}",
                template.table, key
            )));
        }
        let working = inner.staged.as_mut().unwrap_or(&mut inner.tables);
        working
            .entry(template.table)
            .or_default()
            .insert(key, params.to_vec());
        Ok(1)
    }
}

/// Parsed private upsert template
struct Template {
    table: String,
    columns: Vec<String>,
    keys: Vec<String>,
}

impl Template {
    fn parse(sql: &str) -> Result<Self, DriverError> {
        let rest = sql
            .strip_prefix("MEMUPSERT ")
            .ok_or_else(|| DriverError::Statement(format!("unsupported statement: {}", sql)))?;
        let mut parts = rest.split('|');
        let table = parts
            .next()
            .ok_or_else(|| DriverError::Statement("template missing table".to_string()))?;
        let columns = parts
            .next()
            .ok_or_else(|| DriverError::Statement("template missing columns".to_string()))?;
        let keys = parts
            .next()
            .ok_or_else(|| DriverError::Statement("template missing keys".to_string()))?;
        Ok(Self {
            table: table.to_string(),
            columns: columns.split(',').map(str::to_string).collect(),
            keys: keys.split(',').map(str::to_string).collect(),
        })
    }

    /// Extract the key tuple from a parameter row
    fn key_of(&self, params: &[FieldValue]) -> Result<Vec<String>, DriverError> {
        if params.len() != self.columns.len() {
            return Err(DriverError::Statement(format!(
                "bind count {} does not match column count {}",
                params.len(),
                self.columns.len()
            )));
        }
        self.keys
            .iter()
            .map(|key| {
                self.columns
                    .iter()
                    .position(|c| c == key)
                    .map(|at| params[at].to_string())
                    .ok_or_else(|| {
                        DriverError::Statement(format!("key column {} not bound", key))
                    })
            })
            .collect()
    }
}

#[async_trait]
impl Driver for MemoryDriver {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn exec(&mut self, sql: &str, params: &[FieldValue]) -> Result<u64, DriverError> {
        let mut inner = self.state.0.lock().unwrap();
        Self::check_gate(&mut inner)?;
        if sql.starts_with("CREATE TABLE") {
            return Ok(0);
        }
        Self::apply(&mut inner, sql, params)
    }

    async fn bulk_exec(
        &mut self,
        sql: &str,
        param_rows: &[Vec<FieldValue>],
    ) -> Result<u64, DriverError> {
        let mut inner = self.state.0.lock().unwrap();
        Self::check_gate(&mut inner)?;
        let mut affected = 0;
        for row in param_rows {
            affected += Self::apply(&mut inner, sql, row)?;
        }
        Ok(affected)
    }

    async fn query(
        &mut self,
        _sql: &str,
        _params: &[FieldValue],
    ) -> Result<Vec<Vec<(String, FieldValue)>>, DriverError> {
        Ok(Vec::new())
    }

    async fn begin(&mut self) -> Result<(), DriverError> {
        let mut inner = self.state.0.lock().unwrap();
        Self::check_gate(&mut inner)?;
        let snapshot = inner.tables.clone();
        inner.staged = Some(snapshot);
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), DriverError> {
        let mut inner = self.state.0.lock().unwrap();
        Self::check_gate(&mut inner)?;
        if let Some(staged) = inner.staged.take() {
            inner.tables = staged;
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), DriverError> {
        self.state.0.lock().unwrap().staged = None;
        Ok(())
    }

    async fn reconnect(&mut self) -> Result<(), DriverError> {
        self.state.0.lock().unwrap().staged = None;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_double(name)
    }

    fn upsert_template(&self, table: &str, columns: &[&str], pk_columns: &[&str]) -> String {
        format!(
            "MEMUPSERT {}|{}|{}",
            table,
            columns.join(","),
            pk_columns.join(",")
        )
    }
}
