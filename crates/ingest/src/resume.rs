//! Resumable progress state
//!
//! A small JSON file beside the database records the requested boundary and
//! the last chunk that completed, plus the skip-files set of an interrupted
//! chunk, so a rerun of the same request picks up where the previous one
//! stopped.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use umalink_session::SkipFiles;

use crate::{IngestError, Result};

/// Persisted backfill progress
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeState {
    /// Data spec this state belongs to
    pub data_spec: String,
    /// Feed name ("central" / "regional")
    pub feed: String,
    /// Boundary the operator asked for
    pub from_date: NaiveDate,
    pub to_date: Option<NaiveDate>,
    /// Last chunk whose records were fully written
    pub last_completed_chunk: Option<NaiveDate>,
    /// Files delivered by an interrupted chunk attempt
    pub skip_files: SkipFiles,
}

impl ResumeState {
    pub fn new(
        data_spec: impl Into<String>,
        feed: impl Into<String>,
        from_date: NaiveDate,
        to_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            data_spec: data_spec.into(),
            feed: feed.into(),
            from_date,
            to_date,
            last_completed_chunk: None,
            skip_files: SkipFiles::new(),
        }
    }

    /// Conventional state-file path for a request
    pub fn path_for(dir: &Path, feed: &str, data_spec: &str) -> PathBuf {
        dir.join(format!("backfill-{}-{}.json", feed, data_spec.to_lowercase()))
    }

    /// Load the state file, if one exists and matches this request
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path).map_err(|e| IngestError::ResumeState {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let state = serde_json::from_str(&raw).map_err(|e| IngestError::ResumeState {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(state))
    }

    /// Persist the state atomically (write-then-rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| IngestError::ResumeState {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .and_then(|()| std::fs::rename(&tmp, path))
            .map_err(|e| IngestError::ResumeState {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }

    /// Remove the state file after a completed run
    pub fn clear(path: &Path) {
        let _ = std::fs::remove_file(path);
    }

    /// True if this state was written for the same logical request
    pub fn matches(&self, feed: &str, data_spec: &str, from_date: NaiveDate) -> bool {
        self.feed == feed && self.data_spec == data_spec && self.from_date == from_date
    }
}
