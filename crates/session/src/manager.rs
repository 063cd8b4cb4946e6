//! The session manager state machine

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tokio::sync::{mpsc, watch};
use umalink_codec::RecordBuffer;

use crate::codes::{classify_read, classify_status, open_is_fatal, ReadReaction, StatusReaction};
use crate::policy::FeedPolicy;
use crate::vendor::VendorSession;
use crate::{code, Result, SessionError, SessionState, SkipFiles, READ_BUFFER_SIZE, READ_LOOP_BUDGET};

/// Session manager tuning knobs
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Timeout wrapped around the vendor `open` call
    pub open_timeout: Duration,
    /// Interval between `status` polls during download
    pub status_poll_interval: Duration,
    /// No download progress for this long counts as a stall
    pub stall_timeout: Duration,
    /// Back-off after a rate-limit status
    pub rate_limit_backoff: Duration,
    /// Close-wait-reopen attempts before giving up
    pub max_reopen_attempts: u32,
    /// Iteration ceiling of the read loop
    pub read_budget: u32,
    /// Buffer size handed to `read_record`
    pub read_buffer_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            open_timeout: Duration::from_secs(300),
            status_poll_interval: Duration::from_millis(80),
            stall_timeout: Duration::from_secs(60),
            rate_limit_backoff: Duration::from_secs(30),
            max_reopen_attempts: 5,
            read_budget: READ_LOOP_BUDGET,
            read_buffer_size: READ_BUFFER_SIZE,
        }
    }
}

/// What one session run produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchSummary {
    /// Records delivered to the pipeline
    pub records_fetched: u64,
    /// Records suppressed because their file was already delivered
    pub records_skipped: u64,
    /// Records lost to damaged files
    pub records_failed: u64,
    /// Close-wait-reopen cycles taken
    pub retries: u32,
    /// Files fully delivered, for the next attempt
    pub skip_files: SkipFiles,
    /// True when the vendor reported end of stream
    pub completed: bool,
    /// True when the run stopped on a cancellation signal
    pub cancelled: bool,
}

/// Drives one vendor session object through the download/read state machine
///
/// Owns the session object exclusively; it is released on close or failure.
/// Recoverable trouble is absorbed here (bounded by `max_reopen_attempts`)
/// and reflected in the summary counters; only fatal conditions surface as
/// errors.
pub struct SessionManager<S: VendorSession> {
    session: S,
    policy: FeedPolicy,
    config: SessionConfig,
    state: SessionState,
    transitions: Vec<SessionState>,
    skip_files: SkipFiles,
}

impl<S: VendorSession> SessionManager<S> {
    pub fn new(session: S, policy: FeedPolicy, config: SessionConfig) -> Self {
        Self {
            session,
            policy,
            config,
            state: SessionState::Uninitialised,
            transitions: vec![SessionState::Uninitialised],
            skip_files: SkipFiles::new(),
        }
    }

    /// Seed the skip-files set from a previous attempt
    pub fn with_skip_files(mut self, skip_files: SkipFiles) -> Self {
        self.skip_files = skip_files;
        self
    }

    /// Current state
    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Every state the session has been in, in order
    #[inline]
    pub fn transitions(&self) -> &[SessionState] {
        &self.transitions
    }

    /// The owned vendor session, for inspection in tests
    #[inline]
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Release the manager and hand back the session object
    pub fn into_session(self) -> S {
        self.session
    }

    fn set_state(&mut self, next: SessionState) {
        if self.state != next {
            tracing::debug!(from = %self.state, to = %next, "session state");
            self.state = next;
            self.transitions.push(next);
        }
    }

    /// Run one historical session to completion
    ///
    /// Records are pushed into `sink` in the vendor's delivery order.
    /// Cancellation is checked between records and between status polls;
    /// on cancel the session closes cleanly and the summary has
    /// `cancelled = true`.
    pub async fn run(
        &mut self,
        data_spec: &str,
        from_time: &str,
        option: i32,
        service_key: &str,
        cancel: &watch::Receiver<bool>,
        sink: &mpsc::Sender<RecordBuffer>,
    ) -> Result<FetchSummary> {
        self.initialise(service_key).await?;

        let option = self.policy.remap_option(option);
        let mut summary = FetchSummary {
            skip_files: self.skip_files.clone(),
            ..FetchSummary::default()
        };

        let mut attempt: u32 = 0;
        let mut announced_downloads: i32 = 0;
        loop {
            match self.open_once(data_spec, from_time, option).await? {
                OpenOutcome::Ready { download_count } => {
                    announced_downloads = download_count;
                    if download_count > 0 {
                        match self.wait_for_download(cancel).await? {
                            WaitOutcome::Complete => {}
                            WaitOutcome::Cancelled => {
                                return Ok(self.finish_cancelled(summary).await);
                            }
                            WaitOutcome::Retry { code } => {
                                attempt =
                                    self.reopen_or_fail(attempt, code, &mut summary).await?;
                                continue;
                            }
                        }
                    }
                }
                OpenOutcome::Retry { code } => {
                    attempt = self.reopen_or_fail(attempt, code, &mut summary).await?;
                    continue;
                }
            }

            match self.read_stream(cancel, sink, &mut summary).await? {
                ReadOutcome::Complete => {
                    // The regional servers drop sessions every 15-20 files;
                    // there, an end-of-stream only counts once an open has
                    // announced nothing left to download. Earlier files stay
                    // cached, so the count shrinks across reopens.
                    if self.policy.download_count_oracle() && announced_downloads > 0 {
                        tracing::info!(
                            download_count = announced_downloads,
                            "stream ended with downloads still announced, reopening to confirm"
                        );
                        attempt = self.reopen_or_fail(attempt, code::OK, &mut summary).await?;
                        continue;
                    }
                    summary.completed = true;
                    summary.skip_files = self.skip_files.clone();
                    self.session.close().await;
                    self.set_state(SessionState::Closed);
                    tracing::info!(
                        fetched = summary.records_fetched,
                        skipped = summary.records_skipped,
                        failed = summary.records_failed,
                        retries = summary.retries,
                        "session complete"
                    );
                    return Ok(summary);
                }
                ReadOutcome::Cancelled => return Ok(self.finish_cancelled(summary).await),
                ReadOutcome::Retry { code } => {
                    attempt = self.reopen_or_fail(attempt, code, &mut summary).await?;
                }
            }
        }
    }

    /// Run one real-time cycle: open, drain, close
    ///
    /// The vendor returns only data newer than the previous real-time call,
    /// so there is no `from_time` and no download phase.
    pub async fn run_realtime(
        &mut self,
        data_spec: &str,
        key: &str,
        service_key: &str,
        cancel: &watch::Receiver<bool>,
        sink: &mpsc::Sender<RecordBuffer>,
    ) -> Result<FetchSummary> {
        self.initialise(service_key).await?;

        let mut summary = FetchSummary::default();
        self.set_state(SessionState::Opening);
        let reply = self.session.real_time_open(data_spec, key).await;

        if reply.code == code::FILE_BOUNDARY {
            // No data for this key; a normal empty cycle
            self.session.close().await;
            self.set_state(SessionState::Closed);
            summary.completed = true;
            return Ok(summary);
        }
        if open_is_fatal(reply.code) {
            self.set_state(SessionState::Failed);
            return Err(self.open_failure(reply.code, data_spec));
        }
        if reply.code < 0 {
            self.set_state(SessionState::Failed);
            return Err(SessionError::Fatal {
                code: reply.code,
                phase: "real_time_open",
            });
        }

        match self.read_stream(cancel, sink, &mut summary).await? {
            ReadOutcome::Complete => {
                summary.completed = true;
                self.session.close().await;
                self.set_state(SessionState::Closed);
                Ok(summary)
            }
            ReadOutcome::Cancelled => Ok(self.finish_cancelled(summary).await),
            ReadOutcome::Retry { code } => {
                // Real-time cycles are cheap; surface instead of looping
                self.session.close().await;
                self.set_state(SessionState::Failed);
                Err(SessionError::Fatal {
                    code,
                    phase: "realtime_read",
                })
            }
        }
    }

    async fn initialise(&mut self, service_key: &str) -> Result<()> {
        if self.state != SessionState::Uninitialised {
            return Ok(());
        }
        let key = self.policy.init_key(service_key);
        let result = self.session.initialise(key).await;
        if result != code::OK {
            self.set_state(SessionState::Failed);
            return Err(self.open_failure(result, ""));
        }
        self.set_state(SessionState::Initialised);
        Ok(())
    }

    /// One `open` call with the wrapping timeout
    async fn open_once(
        &mut self,
        data_spec: &str,
        from_time: &str,
        option: i32,
    ) -> Result<OpenOutcome> {
        self.set_state(SessionState::Opening);

        let opened = tokio::time::timeout(
            self.config.open_timeout,
            self.session.open(data_spec, from_time, option),
        )
        .await;

        let reply = match opened {
            Ok(reply) => reply,
            Err(_) => {
                tracing::warn!(
                    timeout_s = self.config.open_timeout.as_secs(),
                    "vendor open timed out, cancelling"
                );
                self.session.close().await;
                self.set_state(SessionState::FailedRetryable);
                return Ok(OpenOutcome::Retry { code: code::OK });
            }
        };

        if open_is_fatal(reply.code) {
            self.set_state(SessionState::Failed);
            return Err(self.open_failure(reply.code, data_spec));
        }
        match reply.code {
            c if c >= code::FILE_BOUNDARY => {
                tracing::info!(
                    spec = data_spec,
                    read_count = reply.read_count,
                    download_count = reply.download_count,
                    last_file = %reply.last_file_ts,
                    "vendor stream opened"
                );
                if reply.download_count > 0 {
                    self.set_state(SessionState::Downloading);
                } else {
                    self.set_state(SessionState::Reading);
                }
                Ok(OpenOutcome::Ready {
                    download_count: reply.download_count,
                })
            }
            code::SETUP_INCOMPLETE | code::RATE_LIMIT | code::DOWNLOAD_FAILED
            | code::SERVER_ERROR => {
                self.session.close().await;
                self.set_state(SessionState::FailedRetryable);
                Ok(OpenOutcome::Retry { code: reply.code })
            }
            other => {
                self.set_state(SessionState::Failed);
                Err(SessionError::Fatal {
                    code: other,
                    phase: "open",
                })
            }
        }
    }

    /// Poll `status` until the download completes, stalls, or fails
    async fn wait_for_download(&mut self, cancel: &watch::Receiver<bool>) -> Result<WaitOutcome> {
        let mut last_progress = i32::MIN;
        let mut last_change = Instant::now();

        loop {
            if *cancel.borrow() {
                return Ok(WaitOutcome::Cancelled);
            }

            let status = self.session.status().await;
            match classify_status(status) {
                StatusReaction::Complete => {
                    self.set_state(SessionState::Reading);
                    return Ok(WaitOutcome::Complete);
                }
                StatusReaction::InProgress(progress) => {
                    if progress != last_progress {
                        last_progress = progress;
                        last_change = Instant::now();
                    } else if last_change.elapsed() >= self.config.stall_timeout {
                        tracing::warn!(
                            stalled_s = self.config.stall_timeout.as_secs(),
                            progress,
                            "download stalled"
                        );
                        self.session.close().await;
                        self.set_state(SessionState::FailedRetryable);
                        return Ok(WaitOutcome::Retry { code: code::OK });
                    }
                }
                StatusReaction::RateLimit => {
                    tracing::warn!(
                        backoff_s = self.config.rate_limit_backoff.as_secs(),
                        "vendor rate limit, backing off"
                    );
                    tokio::time::sleep(self.config.rate_limit_backoff).await;
                }
                StatusReaction::Reopen => {
                    self.session.close().await;
                    self.set_state(SessionState::FailedRetryable);
                    return Ok(WaitOutcome::Retry { code: status });
                }
                StatusReaction::Fatal => {
                    self.session.close().await;
                    self.set_state(SessionState::Failed);
                    return Err(SessionError::Fatal {
                        code: status,
                        phase: "status",
                    });
                }
            }

            // Yield between polls; the vendor's async download callbacks run
            // on this interval
            tokio::time::sleep(self.config.status_poll_interval).await;
        }
    }

    /// The read loop: emit records until end-of-stream
    async fn read_stream(
        &mut self,
        cancel: &watch::Receiver<bool>,
        sink: &mpsc::Sender<RecordBuffer>,
        summary: &mut FetchSummary,
    ) -> Result<ReadOutcome> {
        self.set_state(SessionState::Reading);
        let mut current_file: Option<String> = None;

        for _ in 0..self.config.read_budget {
            if *cancel.borrow() {
                return Ok(ReadOutcome::Cancelled);
            }

            let reply = self.session.read_record(self.config.read_buffer_size).await;
            match classify_read(reply.code) {
                ReadReaction::Record => {
                    let file = reply.file_name;
                    if current_file.as_deref() != Some(file.as_str()) {
                        // The vendor moved to a new file; the previous one is
                        // fully delivered
                        if let Some(done) = current_file.take() {
                            self.skip_files.insert(done);
                        }
                        current_file = Some(file.clone());
                    }

                    if self.skip_files.contains(&file) {
                        self.session.skip().await;
                        summary.records_skipped += 1;
                        continue;
                    }

                    let Some(data) = reply.data else {
                        summary.records_failed += 1;
                        continue;
                    };
                    sink.send(RecordBuffer::new(data, file))
                        .await
                        .map_err(|_| SessionError::ChannelClosed)?;
                    summary.records_fetched += 1;
                }
                ReadReaction::Done => {
                    if let Some(done) = current_file.take() {
                        self.skip_files.insert(done);
                    }
                    return Ok(ReadOutcome::Complete);
                }
                ReadReaction::FileSwitch => {
                    if let Some(done) = current_file.take() {
                        self.skip_files.insert(done);
                    }
                }
                ReadReaction::Continue => {
                    tokio::time::sleep(self.config.status_poll_interval).await;
                }
                ReadReaction::DeleteFile => {
                    tracing::warn!(
                        code = reply.code,
                        file = %reply.file_name,
                        "damaged file, asking vendor to delete it"
                    );
                    self.session.file_delete(&reply.file_name).await;
                    summary.records_failed += 1;
                }
                ReadReaction::Reopen => {
                    // The in-progress file is not marked delivered; it will
                    // be refetched whole
                    return Ok(ReadOutcome::Retry { code: reply.code });
                }
                ReadReaction::Fatal => {
                    self.session.close().await;
                    self.set_state(SessionState::Failed);
                    return Err(SessionError::Fatal {
                        code: reply.code,
                        phase: "read",
                    });
                }
            }
        }

        self.session.close().await;
        self.set_state(SessionState::Failed);
        Err(SessionError::ReadBudgetExceeded {
            budget: self.config.read_budget,
        })
    }

    /// Book a retry attempt or give up when the budget is spent
    async fn reopen_or_fail(
        &mut self,
        attempt: u32,
        last_code: i32,
        summary: &mut FetchSummary,
    ) -> Result<u32> {
        self.session.close().await;
        self.set_state(SessionState::FailedRetryable);
        summary.retries += 1;
        summary.skip_files = self.skip_files.clone();

        if attempt + 1 >= self.config.max_reopen_attempts {
            self.set_state(SessionState::Failed);
            return Err(SessionError::RetriesExhausted {
                attempts: attempt + 1,
                last_code,
            });
        }

        let wait = self.policy.reopen_wait();
        tracing::warn!(
            code = last_code,
            attempt = attempt + 1,
            wait_s = wait.as_secs(),
            skip_files = self.skip_files.len(),
            "recoverable session failure, reopening"
        );
        tokio::time::sleep(wait).await;
        Ok(attempt + 1)
    }

    async fn finish_cancelled(&mut self, mut summary: FetchSummary) -> FetchSummary {
        self.session.close().await;
        self.set_state(SessionState::Closed);
        summary.cancelled = true;
        summary.skip_files = self.skip_files.clone();
        tracing::info!(
            fetched = summary.records_fetched,
            "session cancelled, closed cleanly"
        );
        summary
    }

    fn open_failure(&self, result: i32, data_spec: &str) -> SessionError {
        match result {
            code::AUTH_NOT_SET | code::AUTH_ERROR => {
                SessionError::auth(result, self.policy.feed())
            }
            code::UNSUPPORTED_SPEC => SessionError::UnsupportedSpec {
                code: result,
                spec: data_spec.to_string(),
            },
            other => SessionError::Fatal {
                code: other,
                phase: "initialise",
            },
        }
    }
}

/// Internal outcome of one `open`
enum OpenOutcome {
    Ready { download_count: i32 },
    Retry { code: i32 },
}

/// Internal outcome of the download wait
enum WaitOutcome {
    Complete,
    Cancelled,
    Retry { code: i32 },
}

/// Internal outcome of the read loop
enum ReadOutcome {
    Complete,
    Cancelled,
    Retry { code: i32 },
}
