//! The coordinator proper

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::{mpsc, watch};
use umalink_codec::RecordBuffer;
use umalink_parsers::{Feed, ParsedRecord, ParserRegistry};
use umalink_schema::{Path, TableRouter};
use umalink_session::{
    FeedPolicy, FetchSummary, SessionConfig, SessionManager, SkipFiles, VendorSession,
};
use umalink_writer::{FlushOutcome, Writer};

use crate::backfill::{chunk_range, BackfillRequest, DateChunk, OPTION_SETUP};
use crate::resume::ResumeState;
use crate::stats::{ProgressEvent, RunStats};
use crate::{IngestError, Result, RunResult, RECORD_CHANNEL_CAPACITY};

/// Produces a fresh vendor session object per chunk or cycle
///
/// The vendor object leaks over long runs; giving every chunk its own
/// instance bounds the damage even without process isolation.
pub type SessionFactory = Box<dyn FnMut() -> Box<dyn VendorSession> + Send + Sync>;

/// Composes sessions, parsers, routing, and the writer into runs
pub struct Coordinator {
    registry: ParserRegistry,
    router: TableRouter,
    writer: Writer,
    sessions: SessionFactory,
    service_key: String,
    session_config: SessionConfig,
    stats: Arc<RunStats>,
    progress: Option<mpsc::Sender<ProgressEvent>>,
    state_dir: Option<PathBuf>,
}

impl Coordinator {
    /// Build a coordinator over a connected writer
    pub fn new(
        writer: Writer,
        sessions: SessionFactory,
        service_key: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            registry: ParserRegistry::new(),
            router: TableRouter::new()?,
            writer,
            sessions,
            service_key: service_key.into(),
            session_config: SessionConfig::default(),
            stats: Arc::new(RunStats::new()),
            progress: None,
            state_dir: None,
        })
    }

    /// Override the session tuning knobs
    pub fn with_session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Emit progress events into this channel
    pub fn with_progress(mut self, progress: mpsc::Sender<ProgressEvent>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Persist resume state under this directory
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(dir.into());
        self
    }

    /// Shared statistics handle
    pub fn stats(&self) -> Arc<RunStats> {
        Arc::clone(&self.stats)
    }

    /// The table router (for schema initialisation)
    pub fn router(&self) -> &TableRouter {
        &self.router
    }

    /// Create every destination table that does not exist yet
    pub async fn ensure_tables(&mut self) -> Result<()> {
        self.writer.ensure_tables(&self.router).await?;
        Ok(())
    }

    // =========================================================================
    // Historical backfill
    // =========================================================================

    /// Run a historical backfill to completion
    ///
    /// Chunks the date range, runs one session per chunk, and persists
    /// progress after every chunk so an interrupted run resumes. Returns the
    /// final report; a run that finished with failed records reports
    /// `CompletedWithErrors`.
    pub async fn run_backfill(
        &mut self,
        request: &BackfillRequest,
        cancel: &watch::Receiver<bool>,
    ) -> Result<RunResult> {
        request.validate()?;
        self.ensure_tables().await?;

        let policy = FeedPolicy::new(request.feed);
        let chunk_days = request.chunk_days.unwrap_or(policy.default_chunk_days());
        let to_date = request.to_date.unwrap_or_else(|| Utc::now().date_naive());
        let chunks = chunk_range(request.from_date, to_date, chunk_days);

        let state_path = self.state_dir.as_ref().map(|dir| {
            ResumeState::path_for(dir, request.feed.as_str(), &request.data_spec)
        });
        let mut state = self.load_or_new_state(&state_path, request)?;

        tracing::info!(
            feed = %request.feed,
            spec = %request.data_spec,
            from = %request.from_date,
            to = %to_date,
            chunks = chunks.len(),
            resume_from = ?state.last_completed_chunk,
            "backfill starting"
        );

        let mut last_completed = state.last_completed_chunk;
        for chunk in &chunks {
            if let Some(done) = last_completed {
                if chunk.end <= done {
                    continue;
                }
            }
            if *cancel.borrow() {
                return self.finish_cancelled(&state_path, &mut state, last_completed);
            }

            self.stats.set_phase(format!("chunk {}", chunk));
            let skip = std::mem::take(&mut state.skip_files);
            let summary = self
                .run_chunk(request, chunk, request.to_date, skip, cancel)
                .await?;

            if summary.cancelled {
                state.skip_files = summary.skip_files;
                return self.finish_cancelled(&state_path, &mut state, last_completed);
            }

            last_completed = Some(chunk.end);
            state.last_completed_chunk = last_completed;
            state.skip_files = SkipFiles::new();
            if let Some(path) = &state_path {
                state.save(path)?;
            }
            self.emit_progress().await;
            tracing::info!(chunk = %chunk, "chunk complete");
        }

        if let Some(path) = &state_path {
            ResumeState::clear(path);
        }
        self.stats.set_phase("complete");
        Ok(RunResult::from_stats(
            self.stats.snapshot(),
            false,
            last_completed.map(|d| d.to_string()),
        ))
    }

    /// Run exactly one chunk (also the body of a worker process)
    pub async fn run_chunk(
        &mut self,
        request: &BackfillRequest,
        chunk: &DateChunk,
        client_to_date: Option<NaiveDate>,
        skip_files: SkipFiles,
        cancel: &watch::Receiver<bool>,
    ) -> Result<FetchSummary> {
        let policy = FeedPolicy::new(request.feed);
        let session = (self.sessions)();
        let mut manager = SessionManager::new(session, policy, self.session_config.clone())
            .with_skip_files(skip_files);

        let (tx, mut rx) = mpsc::channel::<RecordBuffer>(RECORD_CHANNEL_CAPACITY);
        let spec = request.data_spec.clone();
        let from_time = chunk.from_time();
        let key = self.service_key.clone();
        let session_cancel = cancel.clone();

        let producer = tokio::spawn(async move {
            let result = manager
                .run(&spec, &from_time, OPTION_SETUP, &key, &session_cancel, &tx)
                .await;
            drop(tx);
            result
        });

        // Single consumer: parse, route, filter, write - in delivery order
        while let Some(buffer) = rx.recv().await {
            self.ingest_record(request.feed, Path::Accumulated, &buffer, client_to_date)
                .await?;
        }

        let summary = producer
            .await
            .map_err(|e| IngestError::config(format!("session worker panicked: {}", e)))??;

        let outcomes = self.writer.flush_all().await?;
        self.record_outcomes(&outcomes).await;
        self.stats.add_retries(u64::from(summary.retries));
        self.stats.add_failed(summary.records_failed);

        Ok(summary)
    }

    // =========================================================================
    // Real-time cycles
    // =========================================================================

    /// Run one real-time cycle for one spec
    pub async fn run_realtime_cycle(
        &mut self,
        feed: Feed,
        data_spec: &str,
        cancel: &watch::Receiver<bool>,
    ) -> Result<FetchSummary> {
        let policy = FeedPolicy::new(feed);
        let session = (self.sessions)();
        let mut manager = SessionManager::new(session, policy, self.session_config.clone());

        let (tx, mut rx) = mpsc::channel::<RecordBuffer>(RECORD_CHANNEL_CAPACITY);
        let spec = data_spec.to_string();
        let key = Utc::now().format("%Y%m%d").to_string();
        let service_key = self.service_key.clone();
        let session_cancel = cancel.clone();

        let producer = tokio::spawn(async move {
            let result = manager
                .run_realtime(&spec, &key, &service_key, &session_cancel, &tx)
                .await;
            drop(tx);
            result
        });

        while let Some(buffer) = rx.recv().await {
            self.ingest_record(feed, Path::RealTime, &buffer, None).await?;
        }

        let summary = producer
            .await
            .map_err(|e| IngestError::config(format!("session worker panicked: {}", e)))??;

        let outcomes = self.writer.flush_all().await?;
        self.record_outcomes(&outcomes).await;
        self.stats.add_failed(summary.records_failed);

        Ok(summary)
    }

    // =========================================================================
    // The record path
    // =========================================================================

    /// Parse one buffer and write its rows
    async fn ingest_record(
        &mut self,
        feed: Feed,
        path: Path,
        buffer: &RecordBuffer,
        client_to_date: Option<NaiveDate>,
    ) -> Result<()> {
        self.stats.add_fetched(1);
        self.stats.set_last_file(buffer.file_name());

        let rows = match self.registry.parse(feed, buffer) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(file = %buffer.file_name(), error = %e, "record rejected");
                self.stats.add_failed(1);
                return Ok(());
            }
        };
        self.stats.add_parsed(1);

        for row in rows {
            // The vendor honours from_time but not always to_time; enforce
            // the upper bound client-side
            if let Some(to) = client_to_date {
                if let Some(date) = record_date(&row) {
                    if date > to {
                        continue;
                    }
                }
            }

            let table = match self.router.route(feed, path, row.kind()) {
                Ok(table) => table.clone(),
                Err(e) => {
                    tracing::warn!(kind = row.kind(), error = %e, "no destination");
                    self.stats.add_failed(1);
                    continue;
                }
            };

            match self.writer.submit(&table, &row).await {
                Ok(Some(outcome)) => self.record_outcomes(&[outcome]).await,
                Ok(None) => {}
                Err(e) if e.is_record_local() => {
                    tracing::warn!(table = table.name(), error = %e, "row rejected");
                    self.stats.add_failed(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Fold flush outcomes into the counters and emit progress
    ///
    /// One flush pass counts as one batch tick regardless of how many
    /// tables it touched.
    async fn record_outcomes(&mut self, outcomes: &[FlushOutcome]) {
        let mut any = false;
        for outcome in outcomes {
            if outcome.imported == 0 && outcome.failed == 0 {
                continue;
            }
            any = true;
            self.stats.add_imported(outcome.imported);
            self.stats.add_failed(outcome.failed);
        }
        if any {
            self.stats.add_batches(1);
            self.emit_progress().await;
        }
    }

    async fn emit_progress(&self) {
        if let Some(progress) = &self.progress {
            let _ = progress.try_send(ProgressEvent::from_stats(&self.stats));
        }
    }

    fn load_or_new_state(
        &self,
        state_path: &Option<PathBuf>,
        request: &BackfillRequest,
    ) -> Result<ResumeState> {
        let fresh = ResumeState::new(
            &request.data_spec,
            request.feed.as_str(),
            request.from_date,
            request.to_date,
        );
        let Some(path) = state_path else {
            return Ok(fresh);
        };
        match ResumeState::load(path)? {
            Some(state)
                if state.matches(request.feed.as_str(), &request.data_spec, request.from_date) =>
            {
                Ok(state)
            }
            _ => Ok(fresh),
        }
    }

    fn finish_cancelled(
        &mut self,
        state_path: &Option<PathBuf>,
        state: &mut ResumeState,
        last_completed: Option<NaiveDate>,
    ) -> Result<RunResult> {
        state.last_completed_chunk = last_completed;
        if let Some(path) = state_path {
            state.save(path)?;
        }
        self.stats.set_phase("cancelled");
        tracing::info!("backfill cancelled, progress persisted");
        Ok(RunResult::from_stats(
            self.stats.snapshot(),
            true,
            last_completed.map(|d| d.to_string()),
        ))
    }
}

/// Event date of a parsed row, for client-side range filtering
///
/// Race-scoped rows carry `Year` + `MonthDay`; master rows carry only the
/// vendor `MakeDate` stamp. A row with neither passes the filter.
fn record_date(row: &ParsedRecord) -> Option<NaiveDate> {
    let year_monthday = match (
        row.get("Year").and_then(|v| v.as_int()),
        row.get("MonthDay").and_then(|v| v.as_int()),
    ) {
        (Some(year), Some(month_day)) => Some((year, month_day)),
        _ => None,
    };
    if let Some((year, month_day)) = year_monthday {
        let month = (month_day / 100) as u32;
        let day = (month_day % 100) as u32;
        return NaiveDate::from_ymd_opt(year as i32, month, day);
    }

    let make_date = row.get("MakeDate").and_then(|v| v.as_text())?;
    NaiveDate::parse_from_str(make_date, "%Y%m%d").ok()
}
