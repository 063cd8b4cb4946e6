//! Tests for the batched upsert writer
//!
//! Run against the in-memory driver, which applies real upsert-by-key
//! semantics and supports failure injection for the atomicity and
//! reconnection paths.

use std::time::Duration;

use umalink_codec::FieldValue;
use umalink_parsers::{Feed, ParsedRecord};
use umalink_schema::{Path, TableDef, TableRouter};

use crate::{MemoryDriver, MemoryState, Writer, WriterConfig};

fn router() -> TableRouter {
    TableRouter::new().unwrap()
}

fn ra_table(router: &TableRouter) -> TableDef {
    router
        .route(Feed::Central, Path::Accumulated, "RA")
        .unwrap()
        .clone()
}

/// Minimal RA row with the full race identity
fn ra_record(race_num: i64, kyori: i64) -> ParsedRecord {
    let mut record = ParsedRecord::new("RA");
    record.push("Year", FieldValue::Int(2024));
    record.push("MonthDay", FieldValue::Int(601));
    record.push("JyoCD", FieldValue::Text("05".into()));
    record.push("Kaiji", FieldValue::Int(3));
    record.push("Nichiji", FieldValue::Int(1));
    record.push("RaceNum", FieldValue::Int(race_num));
    record.push("Kyori", FieldValue::Int(kyori));
    record
}

fn ra_key(race_num: &str) -> Vec<String> {
    vec![
        "2024".to_string(),
        "601".to_string(),
        "05".to_string(),
        "3".to_string(),
        "1".to_string(),
        race_num.to_string(),
    ]
}

fn small_writer(batch_size: usize) -> (Writer, MemoryState) {
    let driver = MemoryDriver::new();
    let state = driver.state();
    let config = WriterConfig {
        batch_size,
        reconnect_attempts: 2,
        reconnect_base_delay: Duration::from_millis(1),
    };
    (Writer::new(Box::new(driver), config), state)
}

// =============================================================================
// Submit and flush
// =============================================================================

#[tokio::test]
async fn test_flush_on_capacity() {
    let router = router();
    let table = ra_table(&router);
    let (mut writer, state) = small_writer(2);

    assert!(writer
        .submit(&table, &ra_record(1, 1600))
        .await
        .unwrap()
        .is_none());
    let outcome = writer
        .submit(&table, &ra_record(2, 2000))
        .await
        .unwrap()
        .expect("second push fills the batch");

    assert_eq!(outcome.imported, 2);
    assert_eq!(outcome.failed, 0);
    assert_eq!(writer.pending_rows(), 0);
    assert_eq!(state.row_count("NL_RA"), 2);
}

#[tokio::test]
async fn test_flush_all_drains_every_table() {
    let router = router();
    let ra = ra_table(&router);
    let se = router
        .route(Feed::Central, Path::Accumulated, "SE")
        .unwrap()
        .clone();
    let (mut writer, state) = small_writer(100);

    writer.submit(&ra, &ra_record(1, 1600)).await.unwrap();
    let mut se_record = ra_record(1, 1600);
    se_record.push("KettoNum", FieldValue::Text("2019104567".into()));
    writer.submit(&se, &se_record).await.unwrap();

    let outcomes = writer.flush_all().await.unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(state.row_count("NL_RA"), 1);
    assert_eq!(state.row_count("NL_SE"), 1);
}

// =============================================================================
// Upsert semantics
// =============================================================================

#[tokio::test]
async fn test_upsert_idempotence() {
    let router = router();
    let table = ra_table(&router);
    let (mut writer, state) = small_writer(100);

    writer.submit(&table, &ra_record(1, 1600)).await.unwrap();
    writer.flush_all().await.unwrap();
    writer.submit(&table, &ra_record(1, 1600)).await.unwrap();
    writer.flush_all().await.unwrap();

    assert_eq!(state.row_count("NL_RA"), 1);
}

#[tokio::test]
async fn test_upsert_last_write_wins() {
    let router = router();
    let table = ra_table(&router);
    let (mut writer, state) = small_writer(100);

    writer.submit(&table, &ra_record(1, 1600)).await.unwrap();
    writer.submit(&table, &ra_record(1, 2400)).await.unwrap();
    writer.flush_all().await.unwrap();

    assert_eq!(state.row_count("NL_RA"), 1);
    let row = state.row("NL_RA", &ra_key("1")).expect("row present");
    assert!(row.contains(&FieldValue::Int(2400)));
    assert!(!row.contains(&FieldValue::Int(1600)));
}

// =============================================================================
// Key enforcement
// =============================================================================

#[tokio::test]
async fn test_record_missing_key_is_rejected() {
    let router = router();
    let table = ra_table(&router);
    let (mut writer, _state) = small_writer(100);

    let mut record = ra_record(1, 1600);
    record.push("RaceNum", FieldValue::Null);
    let err = writer.submit(&table, &record).await.unwrap_err();

    assert!(err.is_record_local());
    assert_eq!(writer.pending_rows(), 0);
}

// =============================================================================
// Batch atomicity and row fallback
// =============================================================================

#[tokio::test]
async fn test_failed_batch_falls_back_per_row() {
    let router = router();
    let table = ra_table(&router);
    let (mut writer, state) = small_writer(100);
    // Race 2's row will violate a constraint
    state.poison("NL_RA", ra_key("2"));

    for race in 1..=3 {
        writer.submit(&table, &ra_record(race, 1600)).await.unwrap();
    }
    let outcomes = writer.flush_all().await.unwrap();

    assert_eq!(outcomes.len(), 1);
    let outcome = &outcomes[0];
    assert_eq!(outcome.imported, 2);
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.failed_keys.len(), 1);
    assert_eq!(outcome.failed_keys[0][5], "2");

    // The aborted bulk transaction left nothing behind; only the per-row
    // fallback's successes are committed.
    assert_eq!(state.row_count("NL_RA"), 2);
    assert!(state.row("NL_RA", &ra_key("2")).is_none());
}

// =============================================================================
// Connection recovery
// =============================================================================

#[tokio::test]
async fn test_reconnect_then_succeed() {
    let router = router();
    let table = ra_table(&router);
    let (mut writer, state) = small_writer(100);
    state.drop_connection(1);

    writer.submit(&table, &ra_record(1, 1600)).await.unwrap();
    let outcomes = writer.flush_all().await.unwrap();

    assert_eq!(outcomes[0].imported, 1);
    assert_eq!(state.row_count("NL_RA"), 1);
}

#[tokio::test]
async fn test_reconnect_budget_exhausts() {
    let router = router();
    let table = ra_table(&router);
    let (mut writer, state) = small_writer(100);
    state.drop_connection(100);

    writer.submit(&table, &ra_record(1, 1600)).await.unwrap();
    let err = writer.flush_all().await.unwrap_err();

    assert!(matches!(
        err,
        crate::WriterError::ReconnectExhausted { attempts: 2, .. }
    ));
}
