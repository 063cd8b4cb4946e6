//! `backfill` - historical ingestion over a date range

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tokio::sync::mpsc;
use umalink_ingest::worker::WorkerSupervisor;
use umalink_ingest::{chunk_range, BackfillRequest, ProgressEvent, RunStatus};
use umalink_session::FeedPolicy;

use super::{build_coordinator, cancel_on_ctrl_c, load_config, parse_date, parse_feed};

#[derive(Args, Debug)]
pub struct BackfillArgs {
    /// Feed to ingest: central or regional
    #[arg(long, default_value = "central")]
    pub feed: String,

    /// Vendor data spec (RACE, DIFF, YSCH, ...)
    #[arg(long, default_value = "RACE")]
    pub spec: String,

    /// First day to fetch, YYYY-MM-DD
    #[arg(long)]
    pub from: String,

    /// Last day to fetch, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub to: Option<String>,

    /// Rows per database batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Days per vendor session chunk (default: feed-dependent)
    #[arg(long)]
    pub chunk_days: Option<u32>,

    /// Host each chunk in its own worker process
    #[arg(long)]
    pub isolate_chunks: bool,
}

pub async fn run(config_path: &Path, args: BackfillArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let feed = parse_feed(&args.feed)?;
    let from = parse_date(&args.from)?;

    let mut request = BackfillRequest::new(feed, args.spec.clone(), from);
    if let Some(to) = &args.to {
        request = request.to_date(parse_date(to)?);
    }
    if let Some(batch_size) = args.batch_size {
        request = request.batch_size(batch_size);
    }
    if let Some(chunk_days) = args.chunk_days {
        request = request.chunk_days(chunk_days);
    }

    if args.isolate_chunks || config.session.isolate_chunks {
        return run_isolated(config_path, &config, &args, &request).await;
    }

    let (progress_tx, mut progress_rx) = mpsc::channel::<ProgressEvent>(64);
    let mut coordinator = build_coordinator(&config, feed, args.batch_size)
        .await?
        .with_progress(progress_tx);

    let printer = tokio::spawn(async move {
        while let Some(event) = progress_rx.recv().await {
            tracing::info!(
                phase = %event.phase,
                fetched = event.fetched,
                imported = event.imported,
                failed = event.failed,
                batches = event.batches,
                retries = event.retries,
                file = %event.current_file,
                "progress"
            );
        }
    });

    let cancel = cancel_on_ctrl_c();
    let result = coordinator.run_backfill(&request, &cancel).await;
    printer.abort();

    match result {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            if let Some(remedy) = e.remedy() {
                tracing::error!(error = %e, remedy = %remedy, "backfill failed");
            }
            Err(e).context("backfill failed")
        }
    }
}

/// Parent side of chunk isolation: one worker process per chunk
async fn run_isolated(
    config_path: &Path,
    config: &umalink_config::Config,
    args: &BackfillArgs,
    request: &BackfillRequest,
) -> Result<()> {
    request
        .validate()
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let policy = FeedPolicy::new(request.feed);
    let chunk_days = request.chunk_days.unwrap_or(policy.default_chunk_days());
    let to = request
        .to_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let chunks = chunk_range(request.from_date, to, chunk_days);

    let program = std::env::current_exe().context("resolving current executable")?;
    let base_args = vec![
        "--config".to_string(),
        config_path.display().to_string(),
        "chunk-worker".to_string(),
        "--feed".to_string(),
        args.feed.clone(),
        "--spec".to_string(),
        args.spec.clone(),
    ];
    let mut supervisor = WorkerSupervisor::new(program, base_args);
    supervisor.timeout = std::time::Duration::from_secs(config.session.chunk_timeout_secs);

    let mut fetched = 0u64;
    for chunk in &chunks {
        tracing::info!(chunk = %chunk, "spawning chunk worker");
        let result = supervisor.run_chunk(chunk).await?;
        fetched += result.records_fetched;
        tracing::info!(
            chunk = %chunk,
            fetched = result.records_fetched,
            total = fetched,
            "chunk worker finished"
        );
    }

    println!(
        "backfill complete: {} chunks, {} records fetched",
        chunks.len(),
        fetched
    );
    Ok(())
}

fn print_report(report: &umalink_ingest::RunResult) {
    let status = match report.status {
        RunStatus::Completed => "completed",
        RunStatus::CompletedWithErrors => "completed WITH ERRORS",
        RunStatus::Cancelled => "cancelled",
    };
    println!(
        "backfill {}: fetched={} parsed={} imported={} failed={} batches={} retries={}{}",
        status,
        report.stats.fetched,
        report.stats.parsed,
        report.stats.imported,
        report.stats.failed,
        report.stats.batches,
        report.stats.retries,
        report
            .last_completed_chunk
            .as_ref()
            .map(|c| format!(" last_chunk={}", c))
            .unwrap_or_default()
    );
}
