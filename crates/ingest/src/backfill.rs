//! Backfill request and date-range chunking

use chrono::{Duration as ChronoDuration, NaiveDate};
use umalink_parsers::Feed;

use crate::{IngestError, Result};

/// The vendor's "setup" open option - the only one that behaves
/// deterministically across both feeds for historical backfill
pub const OPTION_SETUP: i32 = 1;

/// One historical backfill request
#[derive(Debug, Clone)]
pub struct BackfillRequest {
    pub feed: Feed,
    /// Vendor data spec token (`RACE`, `DIFF`, `YSCH`, ...)
    pub data_spec: String,
    pub from_date: NaiveDate,
    /// Inclusive end; `None` means "up to today as the vendor sees it"
    pub to_date: Option<NaiveDate>,
    /// Rows per writer batch
    pub batch_size: usize,
    /// Days per session chunk; `None` takes the feed default
    pub chunk_days: Option<u32>,
}

impl BackfillRequest {
    pub fn new(feed: Feed, data_spec: impl Into<String>, from_date: NaiveDate) -> Self {
        Self {
            feed,
            data_spec: data_spec.into(),
            from_date,
            to_date: None,
            batch_size: umalink_writer::DEFAULT_BATCH_SIZE,
            chunk_days: None,
        }
    }

    pub fn to_date(mut self, to_date: NaiveDate) -> Self {
        self.to_date = Some(to_date);
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn chunk_days(mut self, chunk_days: u32) -> Self {
        self.chunk_days = Some(chunk_days.max(1));
        self
    }

    /// Validate date ordering
    pub fn validate(&self) -> Result<()> {
        if let Some(to) = self.to_date {
            if to < self.from_date {
                return Err(IngestError::config(format!(
                    "to_date {} precedes from_date {}",
                    to, self.from_date
                )));
            }
        }
        if self.data_spec.is_empty() {
            return Err(IngestError::config("data_spec is empty"));
        }
        Ok(())
    }
}

/// One date chunk of a backfill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateChunk {
    pub start: NaiveDate,
    /// Inclusive end
    pub end: NaiveDate,
}

impl DateChunk {
    /// Vendor `from_time` stamp for this chunk, `YYYYMMDDhhmmss`
    pub fn from_time(&self) -> String {
        format!("{}000000", self.start.format("%Y%m%d"))
    }
}

impl std::fmt::Display for DateChunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Split `[from, to]` into chunks of `chunk_days`
///
/// The final chunk is clipped to `to`. A range of one day yields one chunk.
pub fn chunk_range(from: NaiveDate, to: NaiveDate, chunk_days: u32) -> Vec<DateChunk> {
    let step = ChronoDuration::days(i64::from(chunk_days.max(1)));
    let mut chunks = Vec::new();
    let mut start = from;
    while start <= to {
        let end = (start + step - ChronoDuration::days(1)).min(to);
        chunks.push(DateChunk { start, end });
        start = end + ChronoDuration::days(1);
    }
    chunks
}
