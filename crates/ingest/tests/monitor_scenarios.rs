//! Live-monitor scenarios: cycles, HTTP trigger, status reporting
//!
//! These run on the real clock with a long idle interval, so only the
//! startup cycle and explicitly triggered cycles execute during the test.

mod common;

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::{mpsc, watch};
use umalink_ingest::{serve_control, Monitor, MonitorConfig, Trigger};
use umalink_parsers::Feed;
use umalink_session::{ReadStep, ScriptedSession};

use common::*;

async fn http_get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        path
    );
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

fn rt_session(records: Vec<(String, Vec<u8>)>) -> ScriptedSession {
    let count = records.len() as i32;
    ScriptedSession::new().push_rt_open(0, count).push_steps(
        records
            .into_iter()
            .map(|(file, data)| ReadStep::record(file, data)),
    )
}

#[tokio::test]
async fn trigger_forces_an_immediate_cycle_and_status_reports_it() {
    // Cycle 1 (startup): two runner records; cycle 2 (triggered): one more
    let first = rt_session(vec![
        ("RT1.dat".to_string(), se_record(1, 1)),
        ("RT1.dat".to_string(), se_record(1, 2)),
    ]);
    let second = rt_session(vec![("RT2.dat".to_string(), se_record(1, 3))]);

    let (coordinator, store) = coordinator(vec![first, second], 100);
    let stats = coordinator.stats();

    let (trigger_tx, trigger_rx) = mpsc::channel::<Trigger>(8);
    let control = serve_control(0, stats.clone(), trigger_tx)
        .await
        .expect("control surface binds");
    let addr = control.local_addr;

    let (cancel_tx, cancel_rx) = watch::channel(false);
    let config = MonitorConfig {
        interval: Duration::from_secs(600),
        ..MonitorConfig::default()
    };
    let mut monitor = Monitor::new(coordinator, Feed::Central, vec!["0B12".to_string()], config);
    let task = tokio::spawn(async move { monitor.run(trigger_rx, cancel_rx, None).await });

    // Startup cycle lands the first two records
    tokio::time::timeout(Duration::from_secs(5), async {
        while store.row_count("RT_SE") < 2 {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("startup cycle wrote its records");

    // A manual trigger starts the next cycle well before the 600 s interval
    let reply = http_get(addr, "/trigger/realtime").await;
    assert!(reply.contains("\"accepted\":true"));

    tokio::time::timeout(Duration::from_secs(5), async {
        while store.row_count("RT_SE") < 3 {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("triggered cycle wrote its record");

    // Status reflects the imported count
    let status = http_get(addr, "/status").await;
    assert!(status.contains("\"imported\":3"), "status was: {}", status);

    cancel_tx.send(true).unwrap();
    let _ = tokio::time::timeout(Duration::from_secs(5), task).await;
    control.shutdown();
}

#[tokio::test]
async fn historical_trigger_runs_a_catchup_backfill() {
    let today = chrono::Utc::now().date_naive();
    // Startup cycle finds no real-time data; the triggered catch-up session
    // delivers one race record for today
    let rt_empty = ScriptedSession::new().push_rt_open(-1, 0);
    let historical = ScriptedSession::new()
        .push_open_ok(1, 0)
        .push_steps([ReadStep::record("H1.dat", ra_record_on(today, 1))]);

    let (coordinator, store) = coordinator(vec![rt_empty, historical], 100);
    let stats = coordinator.stats();

    let (trigger_tx, trigger_rx) = mpsc::channel::<Trigger>(8);
    let control = serve_control(0, stats, trigger_tx)
        .await
        .expect("control surface binds");
    let addr = control.local_addr;

    let (cancel_tx, cancel_rx) = watch::channel(false);
    let config = MonitorConfig {
        interval: Duration::from_secs(600),
        ..MonitorConfig::default()
    };
    let mut monitor = Monitor::new(coordinator, Feed::Central, vec!["0B12".to_string()], config);
    let task = tokio::spawn(async move { monitor.run(trigger_rx, cancel_rx, None).await });

    // Let the startup real-time cycle finish, then ask for the historical path
    tokio::time::sleep(Duration::from_millis(200)).await;
    let reply = http_get(addr, "/trigger/historical").await;
    assert!(reply.contains("\"accepted\":true"));

    // The catch-up lands in the accumulated family, not the real-time one
    tokio::time::timeout(Duration::from_secs(5), async {
        while store.row_count("NL_RA") < 1 {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("historical catch-up wrote its record");
    assert_eq!(store.row_count("RT_RA"), 0);

    cancel_tx.send(true).unwrap();
    let _ = tokio::time::timeout(Duration::from_secs(5), task).await;
    control.shutdown();
}

#[tokio::test]
async fn empty_realtime_cycle_is_clean() {
    // The factory's fallback sessions answer "no data" (-1)
    let (coordinator, store) = coordinator(vec![], 100);
    let stats = coordinator.stats();

    let (_trigger_tx, trigger_rx) = mpsc::channel::<Trigger>(8);
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let config = MonitorConfig {
        interval: Duration::from_secs(600),
        ..MonitorConfig::default()
    };
    let mut monitor = Monitor::new(coordinator, Feed::Central, vec!["0B12".to_string()], config);
    let task = tokio::spawn(async move { monitor.run(trigger_rx, cancel_rx, None).await });

    tokio::time::sleep(Duration::from_millis(200)).await;
    cancel_tx.send(true).unwrap();
    let _ = tokio::time::timeout(Duration::from_secs(5), task).await;

    assert_eq!(store.row_count("RT_SE"), 0);
    assert_eq!(stats.snapshot().imported, 0);
}
