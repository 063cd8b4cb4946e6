//! Live monitor - continuous real-time polling

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use tokio::sync::{mpsc, watch};
use umalink_parsers::Feed;

use crate::backfill::BackfillRequest;
use crate::coordinator::Coordinator;
use crate::http::Trigger;
use crate::stats::ProgressEvent;
use crate::Result;

/// Monitor cadence configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Cycle interval when no trigger arrives
    pub interval: Duration,
    /// Shortest interval accepted from external schedulers
    pub min_interval: Duration,
    /// Data spec fetched by a historical catch-up trigger
    pub historical_spec: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            min_interval: Duration::from_secs(30),
            historical_spec: "RACE".to_string(),
        }
    }
}

/// Continuous real-time polling over one or more data specs
///
/// Each cycle opens the vendor's real-time stream per spec (the vendor
/// returns only data newer than the previous call), drains it into the
/// real-time table family, and closes. An external scheduler steers the
/// monitor through the trigger channel: a real-time trigger starts the next
/// cycle immediately instead of waiting out the interval, and a historical
/// trigger runs a bounded catch-up backfill into the accumulated family.
pub struct Monitor {
    coordinator: Coordinator,
    feed: Feed,
    specs: Vec<String>,
    config: MonitorConfig,
    /// Day the last successful catch-up reached
    last_catchup: Option<NaiveDate>,
}

impl Monitor {
    pub fn new(
        coordinator: Coordinator,
        feed: Feed,
        specs: Vec<String>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            coordinator,
            feed,
            specs,
            config,
            last_catchup: None,
        }
    }

    /// Access the wrapped coordinator
    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Run cycles until cancelled
    ///
    /// `triggers` delivers manual requests from the control surface; each
    /// value selects its path. `RealTime` starts the next polling cycle
    /// immediately, `Historical` runs a catch-up backfill, `Both` does the
    /// catch-up and then a polling cycle. Cycle failures are logged and
    /// counted, never fatal - the next cycle may succeed.
    pub async fn run(
        &mut self,
        mut triggers: mpsc::Receiver<Trigger>,
        cancel: watch::Receiver<bool>,
        progress: Option<mpsc::Sender<ProgressEvent>>,
    ) -> Result<()> {
        self.coordinator.ensure_tables().await?;
        // The vendor rejects faster polling; the floor holds even against a
        // misconfigured external scheduler
        let interval = self.config.interval.max(self.config.min_interval);
        tracing::info!(
            feed = %self.feed,
            specs = ?self.specs,
            interval_s = interval.as_secs(),
            "live monitor starting"
        );

        let mut next = Trigger::RealTime;
        loop {
            if *cancel.borrow() {
                tracing::info!("live monitor cancelled");
                return Ok(());
            }

            match next {
                Trigger::RealTime => self.run_cycle(&cancel).await,
                Trigger::Historical => self.run_catchup(&cancel).await,
                Trigger::Both => {
                    self.run_catchup(&cancel).await;
                    self.run_cycle(&cancel).await;
                }
            }
            if let Some(progress) = &progress {
                let _ = progress.try_send(ProgressEvent::from_stats(&self.coordinator.stats()));
            }

            // Wait for the interval, a trigger, or cancellation - whichever
            // comes first
            let mut cancel_watch = cancel.clone();
            next = tokio::select! {
                _ = tokio::time::sleep(interval) => Trigger::RealTime,
                trigger = triggers.recv() => {
                    match trigger {
                        Some(trigger) => {
                            tracing::info!(?trigger, "manual cycle trigger");
                            trigger
                        }
                        None => {
                            tracing::info!("trigger channel closed, monitor stopping");
                            return Ok(());
                        }
                    }
                }
                _ = cancel_watch.changed() => Trigger::RealTime,
            };
        }
    }

    /// One polling cycle across every configured spec
    async fn run_cycle(&mut self, cancel: &watch::Receiver<bool>) {
        for spec in self.specs.clone() {
            if *cancel.borrow() {
                return;
            }
            self.coordinator.stats().set_phase(format!("monitor {}", spec));
            match self
                .coordinator
                .run_realtime_cycle(self.feed, &spec, cancel)
                .await
            {
                Ok(summary) => {
                    tracing::debug!(
                        spec = %spec,
                        fetched = summary.records_fetched,
                        "realtime cycle complete"
                    );
                }
                Err(e) => {
                    tracing::warn!(spec = %spec, error = %e, "realtime cycle failed");
                }
            }
        }
    }

    /// Bounded historical catch-up: the accumulated tables are brought up
    /// to today, starting from the last day a catch-up reached
    async fn run_catchup(&mut self, cancel: &watch::Receiver<bool>) {
        let today = Utc::now().date_naive();
        let from = self.last_catchup.unwrap_or(today);
        self.coordinator
            .stats()
            .set_phase(format!("catchup {}", self.config.historical_spec));

        let request = BackfillRequest::new(self.feed, self.config.historical_spec.clone(), from)
            .to_date(today);
        match self.coordinator.run_backfill(&request, cancel).await {
            Ok(report) => {
                self.last_catchup = Some(today);
                tracing::info!(
                    spec = %self.config.historical_spec,
                    from = %from,
                    to = %today,
                    imported = report.stats.imported,
                    "historical catch-up complete"
                );
            }
            Err(e) => {
                tracing::warn!(
                    spec = %self.config.historical_spec,
                    error = %e,
                    "historical catch-up failed"
                );
            }
        }
    }
}
