//! Local HTTP control surface
//!
//! A deliberately small loopback server so an external scheduler can read
//! run statistics and force monitor cycles around post time:
//!
//! - `GET /status` - current run statistics
//! - `GET /trigger` - force an immediate cycle of both paths
//! - `GET /trigger/historical` - force a historical catch-up cycle
//! - `GET /trigger/realtime` - force a real-time cycle

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::stats::{RunStats, StatsSnapshot};
use crate::{IngestError, Result};

/// Which path a manual trigger asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Both,
    Historical,
    RealTime,
}

/// Shared state of the control surface
#[derive(Clone)]
struct ControlState {
    stats: Arc<RunStats>,
    triggers: mpsc::Sender<Trigger>,
}

/// Handle to a running control surface
pub struct ControlHandle {
    /// Address the server actually bound (port 0 resolves here)
    pub local_addr: SocketAddr,
    task: tokio::task::JoinHandle<()>,
}

impl ControlHandle {
    /// Stop serving
    pub fn shutdown(self) {
        self.task.abort();
    }
}

/// Reply body of the trigger endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct TriggerReply {
    pub accepted: bool,
    pub trigger: Trigger,
}

/// Start the control surface on the loopback interface
///
/// Triggers are forwarded into `triggers`; a full channel reports
/// `accepted: false` instead of blocking the request.
pub async fn serve_control(
    port: u16,
    stats: Arc<RunStats>,
    triggers: mpsc::Sender<Trigger>,
) -> Result<ControlHandle> {
    let state = ControlState { stats, triggers };
    let app = Router::new()
        .route("/status", get(status))
        .route("/trigger", get(trigger_both))
        .route("/trigger/historical", get(trigger_historical))
        .route("/trigger/realtime", get(trigger_realtime))
        .with_state(state);

    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| IngestError::ControlBind(e.to_string()))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| IngestError::ControlBind(e.to_string()))?;

    tracing::info!(addr = %local_addr, "control surface listening");
    let task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "control surface stopped");
        }
    });

    Ok(ControlHandle { local_addr, task })
}

async fn status(State(state): State<ControlState>) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}

async fn trigger_both(State(state): State<ControlState>) -> Json<TriggerReply> {
    send_trigger(&state, Trigger::Both)
}

async fn trigger_historical(State(state): State<ControlState>) -> Json<TriggerReply> {
    send_trigger(&state, Trigger::Historical)
}

async fn trigger_realtime(State(state): State<ControlState>) -> Json<TriggerReply> {
    send_trigger(&state, Trigger::RealTime)
}

fn send_trigger(state: &ControlState, trigger: Trigger) -> Json<TriggerReply> {
    let accepted = state.triggers.try_send(trigger).is_ok();
    if !accepted {
        tracing::warn!(?trigger, "trigger dropped, channel full");
    }
    Json(TriggerReply { accepted, trigger })
}
