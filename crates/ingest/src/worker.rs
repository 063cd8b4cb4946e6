//! Chunk worker process supervision
//!
//! The vendor session object can leak resources over long runs, so backfill
//! can host each chunk's session in a short-lived child process. The parent
//! hands the chunk to the child on its command line; the child's entire
//! return channel is **one JSON line on stdout** - everything else the
//! child prints goes to stderr and is passed through for logging.
//!
//! The parent enforces a per-chunk timeout, kills stuck children, and
//! carries the returned skip-files set into the retry.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use umalink_session::SkipFiles;

use crate::backfill::DateChunk;
use crate::{IngestError, Result};

/// Default wall-clock budget per chunk attempt
pub const DEFAULT_CHUNK_TIMEOUT: Duration = Duration::from_secs(300);

/// Retry attempts per chunk before the run fails
pub const DEFAULT_CHUNK_ATTEMPTS: u32 = 3;

/// The single JSON line a chunk worker prints at termination
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerResult {
    pub records_fetched: u64,
    pub completed: bool,
    pub skip_files: SkipFiles,
}

/// Parent-side supervisor configuration
#[derive(Debug, Clone)]
pub struct WorkerSupervisor {
    /// Executable to spawn (normally the current binary)
    pub program: PathBuf,
    /// Arguments placed before the chunk arguments
    pub base_args: Vec<String>,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Attempts per chunk
    pub attempts: u32,
}

impl WorkerSupervisor {
    pub fn new(program: impl Into<PathBuf>, base_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            base_args,
            timeout: DEFAULT_CHUNK_TIMEOUT,
            attempts: DEFAULT_CHUNK_ATTEMPTS,
        }
    }

    /// Run one chunk in a child process, retrying dead or stuck children
    ///
    /// Skip-files returned by a failed attempt are passed to the next one
    /// so already-delivered data is not re-parsed.
    pub async fn run_chunk(&self, chunk: &DateChunk) -> Result<WorkerResult> {
        let mut skip = SkipFiles::new();
        let mut last_error = String::new();

        for attempt in 1..=self.attempts {
            match self.spawn_once(chunk, &skip).await {
                Ok(result) if result.completed => {
                    if attempt > 1 {
                        tracing::info!(chunk = %chunk, attempt, "chunk recovered");
                    }
                    return Ok(result);
                }
                Ok(result) => {
                    tracing::warn!(
                        chunk = %chunk,
                        attempt,
                        fetched = result.records_fetched,
                        "worker exited incomplete, retrying with its skip-files"
                    );
                    skip = result.skip_files;
                    last_error = "worker exited incomplete".to_string();
                }
                Err(e) => {
                    tracing::warn!(chunk = %chunk, attempt, error = %e, "worker attempt failed");
                    last_error = e.to_string();
                }
            }
        }

        Err(IngestError::WorkerFailed {
            chunk: chunk.to_string(),
            reason: format!("{} attempts exhausted: {}", self.attempts, last_error),
        })
    }

    /// One child-process attempt
    async fn spawn_once(&self, chunk: &DateChunk, skip: &SkipFiles) -> Result<WorkerResult> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.base_args)
            .arg("--chunk-start")
            .arg(chunk.start.to_string())
            .arg("--chunk-end")
            .arg(chunk.end.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if !skip.is_empty() {
            let files: Vec<&str> = skip.iter().collect();
            command.arg("--skip-files").arg(files.join(","));
        }

        let mut child = command.spawn().map_err(|e| IngestError::WorkerFailed {
            chunk: chunk.to_string(),
            reason: format!("spawn failed: {}", e),
        })?;

        let stdout = child.stdout.take().ok_or_else(|| IngestError::WorkerFailed {
            chunk: chunk.to_string(),
            reason: "child stdout unavailable".to_string(),
        })?;

        let waited = tokio::time::timeout(self.timeout, async move {
            let mut lines = BufReader::new(stdout).lines();
            let mut result_line = None;
            while let Ok(Some(line)) = lines.next_line().await {
                // The last JSON object line wins; anything else is noise
                if line.trim_start().starts_with('{') {
                    result_line = Some(line);
                }
            }
            let status = child.wait().await;
            (status, result_line)
        })
        .await;

        let (status, result_line) = match waited {
            Ok(pair) => pair,
            Err(_) => {
                // kill_on_drop reaps the stuck child
                return Err(IngestError::WorkerFailed {
                    chunk: chunk.to_string(),
                    reason: format!("timed out after {} s", self.timeout.as_secs()),
                });
            }
        };

        let status = status.map_err(|e| IngestError::WorkerFailed {
            chunk: chunk.to_string(),
            reason: format!("wait failed: {}", e),
        })?;
        if !status.success() {
            return Err(IngestError::WorkerFailed {
                chunk: chunk.to_string(),
                reason: format!("worker exited with {}", status),
            });
        }

        let line = result_line.ok_or_else(|| IngestError::WorkerFailed {
            chunk: chunk.to_string(),
            reason: "worker printed no result line".to_string(),
        })?;
        serde_json::from_str(&line).map_err(|e| IngestError::WorkerFailed {
            chunk: chunk.to_string(),
            reason: format!("bad result line {:?}: {}", line, e),
        })
    }
}
