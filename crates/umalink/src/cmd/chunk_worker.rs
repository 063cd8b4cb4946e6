//! `chunk-worker` - run one backfill chunk inside a short-lived process
//!
//! Internal subcommand. The parent process owns the chunk loop and the
//! resume state; this worker runs exactly one chunk and prints exactly one
//! JSON line on stdout. Logging goes to stderr.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use umalink_ingest::worker::WorkerResult;
use umalink_ingest::{BackfillRequest, DateChunk};
use umalink_session::SkipFiles;

use super::{build_coordinator, cancel_on_ctrl_c, load_config, parse_date, parse_feed};

#[derive(Args, Debug)]
pub struct ChunkWorkerArgs {
    #[arg(long)]
    pub feed: String,

    #[arg(long)]
    pub spec: String,

    /// Chunk start, YYYY-MM-DD
    #[arg(long)]
    pub chunk_start: String,

    /// Chunk end (inclusive), YYYY-MM-DD
    #[arg(long)]
    pub chunk_end: String,

    /// Comma-separated file names already delivered by a prior attempt
    #[arg(long)]
    pub skip_files: Option<String>,
}

pub async fn run(config_path: &Path, args: ChunkWorkerArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let feed = parse_feed(&args.feed)?;
    let chunk = DateChunk {
        start: parse_date(&args.chunk_start)?,
        end: parse_date(&args.chunk_end)?,
    };
    let skip: SkipFiles = args
        .skip_files
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();

    let request = BackfillRequest::new(feed, args.spec.clone(), chunk.start).to_date(chunk.end);
    let mut coordinator = build_coordinator(&config, feed, None).await?;
    let cancel = cancel_on_ctrl_c();

    let summary = coordinator
        .run_chunk(&request, &chunk, Some(chunk.end), skip, &cancel)
        .await
        .context("chunk failed")?;

    let result = WorkerResult {
        records_fetched: summary.records_fetched,
        completed: summary.completed,
        skip_files: summary.skip_files,
    };
    // The one line the parent reads
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
