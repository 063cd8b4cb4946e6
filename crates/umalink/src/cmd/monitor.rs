//! `monitor` - continuous real-time ingestion

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tokio::sync::{mpsc, watch};
use umalink_ingest::{serve_control, Monitor, MonitorConfig, Trigger};

use super::{build_coordinator, load_config, parse_feed};

#[derive(Args, Debug)]
pub struct MonitorArgs {
    /// Feed to monitor: central or regional
    #[arg(long, default_value = "central")]
    pub feed: String,

    /// Real-time specs to poll (default: from config)
    #[arg(long)]
    pub spec: Vec<String>,

    /// Cycle interval in seconds (default: from config)
    #[arg(long)]
    pub interval: Option<u64>,
}

pub async fn run(config_path: &Path, args: MonitorArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let feed = parse_feed(&args.feed)?;

    let specs = if args.spec.is_empty() {
        config.monitor.specs.clone()
    } else {
        args.spec.clone()
    };
    let interval = args.interval.unwrap_or(config.monitor.interval_secs).max(30);

    let coordinator = build_coordinator(&config, feed, None).await?;
    let stats = coordinator.stats();

    let (trigger_tx, trigger_rx) = mpsc::channel::<Trigger>(16);
    let control = if config.control.enabled {
        Some(
            serve_control(config.control.port, stats, trigger_tx)
                .await
                .context("starting control surface")?,
        )
    } else {
        None
    };

    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, stopping monitor");
            let _ = cancel_tx.send(true);
            std::future::pending::<()>().await;
        }
    });

    let monitor_config = MonitorConfig {
        interval: Duration::from_secs(interval),
        historical_spec: config.monitor.historical_spec.clone(),
        ..MonitorConfig::default()
    };
    let mut monitor = Monitor::new(coordinator, feed, specs, monitor_config);
    let result = monitor.run(trigger_rx, cancel_rx, None).await;

    if let Some(control) = control {
        control.shutdown();
    }
    result.context("monitor failed")
}
