//! Subcommand implementations and shared plumbing

pub mod backfill;
pub mod chunk_worker;
pub mod init_db;
pub mod monitor;

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use umalink_config::{Config, DatabaseEngine};
use umalink_ingest::{Coordinator, SessionFactory};
use umalink_parsers::Feed;
use umalink_session::{BridgeConfig, BridgeSession, SessionConfig, VendorSession};
use umalink_writer::{PostgresConfig, PostgresDriver, TursoDriver, Writer, WriterConfig};

/// Load and validate the config file
pub(crate) fn load_config(path: &Path) -> Result<Config> {
    Config::load(path).with_context(|| format!("loading config {}", path.display()))
}

/// Parse a `central`/`regional` feed argument
pub(crate) fn parse_feed(raw: &str) -> Result<Feed> {
    match raw.to_ascii_lowercase().as_str() {
        "central" => Ok(Feed::Central),
        "regional" => Ok(Feed::Regional),
        other => bail!("unknown feed '{}'; expected 'central' or 'regional'", other),
    }
}

/// Parse a `YYYY-MM-DD` date argument
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}'; expected YYYY-MM-DD", raw))
}

/// Connect the configured database and wrap it in a writer
pub(crate) async fn build_writer(config: &Config, batch_size: Option<usize>) -> Result<Writer> {
    let batch = batch_size.unwrap_or(config.database.batch_size);
    let writer_config = WriterConfig::with_batch_size(batch);
    match config.database.engine {
        DatabaseEngine::Embedded => {
            if let Some(dir) = Path::new(&config.database.path).parent() {
                std::fs::create_dir_all(dir).ok();
            }
            let driver = TursoDriver::connect(config.database.path.clone())
                .await
                .context("opening embedded database")?;
            Ok(Writer::new(Box::new(driver), writer_config))
        }
        DatabaseEngine::Postgres => {
            let driver = PostgresDriver::connect(PostgresConfig::new(&config.database.url))
                .await
                .context("connecting to postgres")?;
            Ok(Writer::new(Box::new(driver), writer_config))
        }
    }
}

/// Session factory over the configured bridge executable
pub(crate) fn session_factory(config: &Config, feed: Feed) -> Result<SessionFactory> {
    let executable = config
        .bridge_executable
        .clone()
        .context("config is missing 'bridge_executable'")?;
    Ok(Box::new(move || {
        Box::new(BridgeSession::new(BridgeConfig::new(&executable, feed)))
            as Box<dyn VendorSession>
    }))
}

/// Session tuning from the config file
pub(crate) fn session_config(config: &Config) -> SessionConfig {
    SessionConfig {
        open_timeout: Duration::from_secs(config.session.open_timeout_secs),
        status_poll_interval: Duration::from_millis(config.session.status_poll_ms),
        stall_timeout: Duration::from_secs(config.session.stall_timeout_secs),
        max_reopen_attempts: config.session.max_reopen_attempts,
        ..SessionConfig::default()
    }
}

/// Assemble a coordinator from the config
pub(crate) async fn build_coordinator(
    config: &Config,
    feed: Feed,
    batch_size: Option<usize>,
) -> Result<Coordinator> {
    let writer = build_writer(config, batch_size).await?;
    let sessions = session_factory(config, feed)?;
    let mut coordinator = Coordinator::new(writer, sessions, config.service_key.clone())?
        .with_session_config(session_config(config));
    if let Some(dir) = &config.state_dir {
        std::fs::create_dir_all(dir).ok();
        coordinator = coordinator.with_state_dir(dir);
    }
    Ok(coordinator)
}

/// Watch channel wired to Ctrl-C
pub(crate) fn cancel_on_ctrl_c() -> tokio::sync::watch::Receiver<bool> {
    let (tx, rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, finishing current batch");
            let _ = tx.send(true);
        }
        // Keep the sender alive so later borrows still see the flag
        std::future::pending::<()>().await;
    });
    rx
}
