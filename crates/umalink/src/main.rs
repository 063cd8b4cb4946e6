//! Umalink - race-data feed ingestion
//!
//! # Usage
//!
//! ```bash
//! # Create the destination schema
//! umalink init-db --config configs/umalink.toml
//!
//! # Backfill one month of central race data
//! umalink backfill --feed central --spec RACE --from 2024-06-01 --to 2024-06-30
//!
//! # Run the live monitor with the HTTP control surface
//! umalink monitor --feed central
//! ```
//!
//! `chunk-worker` is internal: the backfill parent spawns it per date chunk
//! when chunk isolation is enabled, and reads one JSON result line from its
//! stdout.

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Race-data feed ingestion service
#[derive(Parser, Debug)]
#[command(name = "umalink")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file
    #[arg(short, long, default_value = "configs/umalink.toml", global = true)]
    config: std::path::PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create every destination table that does not exist yet
    InitDb(cmd::init_db::InitDbArgs),

    /// Historical backfill over a date range
    Backfill(cmd::backfill::BackfillArgs),

    /// Continuous real-time monitoring
    Monitor(cmd::monitor::MonitorArgs),

    /// Internal: run one backfill chunk and print its result as JSON
    #[command(hide = true)]
    ChunkWorker(cmd::chunk_worker::ChunkWorkerArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::InitDb(args) => {
            init_logging(&cli.log_level, false)?;
            cmd::init_db::run(&cli.config, args).await
        }
        Command::Backfill(args) => {
            init_logging(&cli.log_level, false)?;
            cmd::backfill::run(&cli.config, args).await
        }
        Command::Monitor(args) => {
            init_logging(&cli.log_level, false)?;
            cmd::monitor::run(&cli.config, args).await
        }
        Command::ChunkWorker(args) => {
            // Stdout belongs to the result line; all logging goes to stderr
            init_logging(&cli.log_level, true)?;
            cmd::chunk_worker::run(&cli.config, args).await
        }
    }
}

/// Install the tracing subscriber
fn init_logging(level: &str, to_stderr: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("umalink={level},umalink_ingest={level},info")));
    if to_stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
    Ok(())
}
