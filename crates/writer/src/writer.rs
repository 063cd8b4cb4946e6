//! The batched upsert writer

use std::collections::HashMap;
use std::time::Duration;

use umalink_parsers::ParsedRecord;
use umalink_schema::{TableDef, TableRouter};

use crate::batch::{BatchBuffer, FlushOutcome};
use crate::driver::Driver;
use crate::{Result, WriterError, DEFAULT_BATCH_SIZE, MAX_RECONNECT_ATTEMPTS};

/// Writer tuning knobs
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Rows per table before an automatic flush
    pub batch_size: usize,
    /// Reconnect attempts after a lost connection
    pub reconnect_attempts: u32,
    /// Base delay of the reconnect back-off (doubles per attempt)
    pub reconnect_base_delay: Duration,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            reconnect_attempts: MAX_RECONNECT_ATTEMPTS,
            reconnect_base_delay: Duration::from_millis(500),
        }
    }
}

impl WriterConfig {
    /// Config with a custom batch size
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            ..Self::default()
        }
    }
}

/// Batched transactional upsert writer
///
/// Accepts records one at a time, groups them by destination table, and
/// flushes a table's batch when it reaches capacity, on [`flush_all`], or on
/// shutdown. Holds at most one open transaction at any moment.
///
/// [`flush_all`]: Writer::flush_all
pub struct Writer {
    driver: Box<dyn Driver>,
    config: WriterConfig,
    batches: HashMap<String, BatchBuffer>,
}

impl Writer {
    /// Create a writer over a connected driver
    pub fn new(driver: Box<dyn Driver>, config: WriterConfig) -> Self {
        Self {
            driver,
            config,
            batches: HashMap::new(),
        }
    }

    /// Create every destination table that does not exist yet
    pub async fn ensure_tables(&mut self, router: &TableRouter) -> Result<()> {
        for table in router.tables() {
            let sql = table.create_sql(|name| self.driver.quote_identifier(name));
            self.driver.exec(&sql, &[]).await?;
        }
        tracing::info!(
            driver = self.driver.name(),
            tables = router.table_count(),
            "destination schema ensured"
        );
        Ok(())
    }

    /// Queue one record for its destination table
    ///
    /// Returns the flush outcome when this push filled the table's batch.
    ///
    /// # Errors
    ///
    /// Record-local errors (`MissingKeyColumn`) mean this record is dropped
    /// and must be counted failed; the writer itself stays usable.
    pub async fn submit(
        &mut self,
        table: &TableDef,
        record: &ParsedRecord,
    ) -> Result<Option<FlushOutcome>> {
        if !self.batches.contains_key(table.name()) {
            let buffer = BatchBuffer::new(table.clone(), self.config.batch_size)?;
            self.batches.insert(table.name().to_string(), buffer);
        }
        // Just inserted above when absent
        let batch = self
            .batches
            .get_mut(table.name())
            .ok_or_else(|| WriterError::NoPrimaryKey(table.name().to_string()))?;
        batch.push(record)?;

        if batch.len() >= self.config.batch_size {
            let outcome = self.flush_table(table.name().to_string()).await?;
            return Ok(Some(outcome));
        }
        Ok(None)
    }

    /// Flush every non-empty batch
    pub async fn flush_all(&mut self) -> Result<Vec<FlushOutcome>> {
        let mut names: Vec<String> = self
            .batches
            .iter()
            .filter(|(_, b)| !b.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort_unstable();

        let mut outcomes = Vec::with_capacity(names.len());
        for name in names {
            outcomes.push(self.flush_table(name).await?);
        }
        Ok(outcomes)
    }

    /// Release the database connection after a final flush
    pub async fn shutdown(&mut self) -> Result<Vec<FlushOutcome>> {
        let outcomes = self.flush_all().await?;
        self.driver.close().await?;
        Ok(outcomes)
    }

    /// Flush one table's batch: `begin → bulk upsert → commit`
    ///
    /// On a statement error the transaction rolls back and every row retries
    /// individually; rows that still fail are reported in the outcome with
    /// their key values. On connection loss the whole batch retries after
    /// the reconnect loop restores the driver.
    async fn flush_table(&mut self, name: String) -> Result<FlushOutcome> {
        let Some(batch) = self.batches.get_mut(&name) else {
            return Ok(FlushOutcome {
                table: name,
                ..FlushOutcome::default()
            });
        };
        let rows = batch.take_rows();
        if rows.is_empty() {
            return Ok(FlushOutcome {
                table: name,
                ..FlushOutcome::default()
            });
        }

        let table = batch.table().clone();
        let columns = table.column_names();
        let keys: Vec<&str> = table.primary_key().iter().map(String::as_str).collect();
        let sql = self.driver.upsert_template(table.name(), &columns, &keys);

        let mut attempt = 0;
        loop {
            match self.try_flush(&sql, &rows).await {
                Ok(()) => {
                    tracing::debug!(table = %name, rows = rows.len(), "batch flushed");
                    return Ok(FlushOutcome {
                        table: name,
                        imported: rows.len() as u64,
                        failed: 0,
                        failed_keys: Vec::new(),
                    });
                }
                Err(e) if e.is_connection_lost() => {
                    self.recover_connection(attempt, &e).await?;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        table = %name,
                        error = %e,
                        "batch upsert failed, retrying rows individually"
                    );
                    let _ = self.driver.rollback().await;
                    return self.flush_rows_individually(&table, &sql, rows).await;
                }
            }
        }
    }

    async fn try_flush(
        &mut self,
        sql: &str,
        rows: &[Vec<umalink_codec::FieldValue>],
    ) -> std::result::Result<(), crate::DriverError> {
        self.driver.begin().await?;
        match self.driver.bulk_exec(sql, rows).await {
            Ok(_) => self.driver.commit().await,
            Err(e) => {
                let _ = self.driver.rollback().await;
                Err(e)
            }
        }
    }

    /// Row-at-a-time fallback after a failed batch
    async fn flush_rows_individually(
        &mut self,
        table: &TableDef,
        sql: &str,
        rows: Vec<Vec<umalink_codec::FieldValue>>,
    ) -> Result<FlushOutcome> {
        let mut outcome = FlushOutcome {
            table: table.name().to_string(),
            ..FlushOutcome::default()
        };

        for row in rows {
            match self.driver.exec(sql, &row).await {
                Ok(_) => outcome.imported += 1,
                Err(e) if e.is_connection_lost() => return Err(e.into()),
                Err(e) => {
                    let key = key_values(table, &row);
                    tracing::error!(
                        table = %table.name(),
                        key = ?key,
                        error = %e,
                        "row failed after batch fallback"
                    );
                    outcome.failed += 1;
                    outcome.failed_keys.push(key);
                }
            }
        }

        Ok(outcome)
    }

    /// Reconnect with exponential back-off, or give up
    async fn recover_connection(
        &mut self,
        attempt: u32,
        cause: &crate::DriverError,
    ) -> Result<()> {
        if attempt >= self.config.reconnect_attempts {
            return Err(WriterError::ReconnectExhausted {
                attempts: attempt,
                last: cause.to_string(),
            });
        }
        let delay = self.config.reconnect_base_delay * 2u32.saturating_pow(attempt);
        tracing::warn!(
            attempt = attempt + 1,
            delay_ms = delay.as_millis() as u64,
            error = %cause,
            "database connection lost, reconnecting"
        );
        tokio::time::sleep(delay).await;
        self.driver.reconnect().await?;
        Ok(())
    }

    /// Rows currently buffered across all tables
    pub fn pending_rows(&self) -> usize {
        self.batches.values().map(BatchBuffer::len).sum()
    }

    /// Access the driver, mainly for tests
    pub fn driver_mut(&mut self) -> &mut dyn Driver {
        self.driver.as_mut()
    }
}

/// Primary-key values of a bound row, for failure logging
fn key_values(table: &TableDef, row: &[umalink_codec::FieldValue]) -> Vec<String> {
    table
        .primary_key()
        .iter()
        .filter_map(|key| {
            table
                .columns()
                .iter()
                .position(|c| &c.name == key)
                .and_then(|at| row.get(at))
                .map(ToString::to_string)
        })
        .collect()
}
