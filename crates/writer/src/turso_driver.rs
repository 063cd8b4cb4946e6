//! Embedded single-file engine driver (Turso, SQLite-compatible)

use async_trait::async_trait;
use turso::{Builder, Connection, Database};
use umalink_codec::FieldValue;

use crate::driver::{quote_double, Driver};
use crate::DriverError;

/// Driver for the embedded database
///
/// Upsert dialect is `INSERT OR REPLACE`. One connection, one open
/// transaction at a time - exactly the writer's locking discipline.
pub struct TursoDriver {
    path: String,
    db: Database,
    conn: Connection,
}

impl TursoDriver {
    /// Open (or create) the database file; `":memory:"` for an in-memory one
    pub async fn connect(path: impl Into<String>) -> Result<Self, DriverError> {
        let path = path.into();
        let db = Builder::new_local(&path)
            .build()
            .await
            .map_err(|e| DriverError::Config(e.to_string()))?;
        let conn = db
            .connect()
            .map_err(|e| DriverError::Connection(e.to_string()))?;
        Ok(Self { path, db, conn })
    }

    fn to_params(params: &[FieldValue]) -> Vec<turso::Value> {
        params.iter().map(to_value).collect()
    }
}

fn to_value(value: &FieldValue) -> turso::Value {
    match value {
        FieldValue::Int(v) => turso::Value::Integer(*v),
        FieldValue::Real(v) => turso::Value::Real(*v),
        FieldValue::Text(v) => turso::Value::Text(v.clone()),
        FieldValue::Null => turso::Value::Null,
    }
}

fn from_value(value: turso::Value) -> FieldValue {
    match value {
        turso::Value::Integer(v) => FieldValue::Int(v),
        turso::Value::Real(v) => FieldValue::Real(v),
        turso::Value::Text(v) => FieldValue::Text(v),
        turso::Value::Blob(v) => FieldValue::Text(String::from_utf8_lossy(&v).into_owned()),
        turso::Value::Null => FieldValue::Null,
    }
}

#[async_trait]
impl Driver for TursoDriver {
    fn name(&self) -> &'static str {
        "turso"
    }

    async fn exec(&mut self, sql: &str, params: &[FieldValue]) -> Result<u64, DriverError> {
        self.conn
            .execute(sql, Self::to_params(params))
            .await
            .map_err(|e| DriverError::Statement(e.to_string()))
    }

    async fn bulk_exec(
        &mut self,
        sql: &str,
        param_rows: &[Vec<FieldValue>],
    ) -> Result<u64, DriverError> {
        let mut affected = 0;
        for row in param_rows {
            affected += self
                .conn
                .execute(sql, Self::to_params(row))
                .await
                .map_err(|e| DriverError::Statement(e.to_string()))?;
        }
        Ok(affected)
    }

    async fn query(
        &mut self,
        sql: &str,
        params: &[FieldValue],
    ) -> Result<Vec<Vec<(String, FieldValue)>>, DriverError> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .await
            .map_err(|e| DriverError::Statement(e.to_string()))?;
        let column_names: Vec<String> = stmt
            .columns()
            .into_iter()
            .map(|c| c.name().to_string())
            .collect();
        let mut rows = stmt
            .query(Self::to_params(params))
            .await
            .map_err(|e| DriverError::Statement(e.to_string()))?;

        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DriverError::Statement(e.to_string()))?
        {
            let mut cols = Vec::with_capacity(row.column_count());
            for index in 0..row.column_count() {
                let name = column_names
                    .get(index)
                    .cloned()
                    .unwrap_or_default();
                let value = row
                    .get_value(index)
                    .map_err(|e| DriverError::Statement(e.to_string()))?;
                cols.push((name, from_value(value)));
            }
            out.push(cols);
        }
        Ok(out)
    }

    async fn begin(&mut self) -> Result<(), DriverError> {
        self.conn
            .execute("BEGIN", ())
            .await
            .map_err(|e| DriverError::Statement(e.to_string()))?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), DriverError> {
        self.conn
            .execute("COMMIT", ())
            .await
            .map_err(|e| DriverError::Statement(e.to_string()))?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), DriverError> {
        self.conn
            .execute("ROLLBACK", ())
            .await
            .map_err(|e| DriverError::Statement(e.to_string()))?;
        Ok(())
    }

    async fn reconnect(&mut self) -> Result<(), DriverError> {
        self.conn = self
            .db
            .connect()
            .map_err(|e| DriverError::Connection(e.to_string()))?;
        tracing::debug!(path = %self.path, "reopened embedded database connection");
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        // Connections close on drop; nothing to flush beyond committed state
        Ok(())
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_double(name)
    }

    fn upsert_template(&self, table: &str, columns: &[&str], pk_columns: &[&str]) -> String {
        upsert_template(table, columns, pk_columns)
    }
}

/// `INSERT OR REPLACE` template; the engine resolves the conflict from the
/// table's own primary key, so the key list is not repeated in the SQL
pub(crate) fn upsert_template(table: &str, columns: &[&str], _pk_columns: &[&str]) -> String {
    let cols: Vec<String> = columns.iter().map(|c| quote_double(c)).collect();
    let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    format!(
        "INSERT OR REPLACE INTO {} ({}) VALUES ({})",
        quote_double(table),
        cols.join(", "),
        placeholders.join(", ")
    )
}
