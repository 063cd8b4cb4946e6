//! Coordinator error and result types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats::StatsSnapshot;

/// Errors that end a run
///
/// Recoverable trouble never reaches this type; it is absorbed by the
/// session manager and the writer and shows up in the run statistics as
/// `retries`/`failed`.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Invalid request (bad date range, unknown spec, missing key)
    #[error("invalid request: {0}")]
    Config(String),

    /// Fatal session failure, after the retry budget where one applied
    #[error(transparent)]
    Session(#[from] umalink_session::SessionError),

    /// Fatal writer failure (reconnect loop exhausted)
    #[error(transparent)]
    Writer(#[from] umalink_writer::WriterError),

    /// Schema catalogue failure
    #[error(transparent)]
    Schema(#[from] umalink_schema::SchemaError),

    /// Progress-state file could not be read or written
    #[error("resume state unavailable at {path}: {reason}")]
    ResumeState { path: String, reason: String },

    /// A chunk worker process died or timed out past its retry budget
    #[error("chunk worker failed for {chunk}: {reason}")]
    WorkerFailed { chunk: String, reason: String },

    /// The control surface could not bind its port
    #[error("control surface failed to bind: {0}")]
    ControlBind(String),
}

impl IngestError {
    /// Create a config error
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Operator-facing remedy hint for this failure
    pub fn remedy(&self) -> Option<String> {
        match self {
            IngestError::Session(e) => match e {
                umalink_session::SessionError::Auth { remedy, .. } => Some(remedy.clone()),
                umalink_session::SessionError::UnsupportedSpec { spec, .. } => Some(format!(
                    "remove {} from the requested specs or extend the vendor contract",
                    spec
                )),
                umalink_session::SessionError::RetriesExhausted { .. } => {
                    Some("the vendor servers kept failing; retry later - progress was kept".into())
                }
                _ => None,
            },
            IngestError::Writer(_) => {
                Some("check database connectivity and rerun; the run resumes from the last chunk".into())
            }
            IngestError::ResumeState { path, .. } => {
                Some(format!("delete or fix the state file at {}", path))
            }
            _ => None,
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every record made it in
    Completed,
    /// The run finished but some records were counted failed - the operator
    /// must be able to tell this apart from a clean run
    CompletedWithErrors,
    /// Stopped by a cancellation signal; progress was persisted
    Cancelled,
}

/// Final report of a backfill run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub status: RunStatus,
    pub stats: StatsSnapshot,
    /// Last chunk that completed, `YYYY-MM-DD`
    pub last_completed_chunk: Option<String>,
}

impl RunResult {
    pub(crate) fn from_stats(snapshot: StatsSnapshot, cancelled: bool, last: Option<String>) -> Self {
        let status = if cancelled {
            RunStatus::Cancelled
        } else if snapshot.failed > 0 {
            RunStatus::CompletedWithErrors
        } else {
            RunStatus::Completed
        };
        Self {
            status,
            stats: snapshot,
            last_completed_chunk: last,
        }
    }
}
