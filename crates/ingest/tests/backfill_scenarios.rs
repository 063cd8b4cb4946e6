//! End-to-end backfill scenarios against the scripted vendor session and
//! the in-memory store

mod common;

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use umalink_ingest::{BackfillRequest, RunStatus};
use umalink_parsers::Feed;
use umalink_session::{ReadStep, ScriptedSession};

use common::*;

fn no_cancel() -> watch::Receiver<bool> {
    // A closed watch keeps serving its last value
    watch::channel(false).1
}

/// Central feed, one day of race data, clean path: 3 races and 48 runners
/// land in their tables in one batch
#[tokio::test(start_paused = true)]
async fn central_one_day_clean_path() {
    let mut session = ScriptedSession::new().push_open_ok(51, 0);
    let mut steps = Vec::new();
    for race in 1..=3 {
        steps.push(ReadStep::record("RACE.dat", ra_record(race)));
    }
    for race in 1..=3 {
        for horse in 1..=16 {
            steps.push(ReadStep::record("RACE.dat", se_record(race, horse)));
        }
    }
    session = session.push_steps(steps);

    let (mut coordinator, store) = coordinator(vec![session], 1000);
    let request = BackfillRequest::new(Feed::Central, "RACE", fixture_date())
        .to_date(fixture_date());

    let result = coordinator
        .run_backfill(&request, &no_cancel())
        .await
        .unwrap();

    assert_eq!(result.status, RunStatus::Completed);
    assert_eq!(result.stats.imported, 51);
    assert_eq!(result.stats.failed, 0);
    assert_eq!(result.stats.batches, 1);
    assert_eq!(store.row_count("NL_RA"), 3);
    assert_eq!(store.row_count("NL_SE"), 48);
}

/// Feeding the same race records twice counts two writes but leaves
/// exactly the original three rows
#[tokio::test(start_paused = true)]
async fn upsert_replaces_on_second_write() {
    let mut steps = Vec::new();
    for pass in 0..2 {
        for race in 1..=3 {
            steps.push(ReadStep::record(
                format!("PASS{}.dat", pass),
                ra_record(race),
            ));
        }
    }
    let session = ScriptedSession::new().push_open_ok(6, 0).push_steps(steps);

    let (mut coordinator, store) = coordinator(vec![session], 1000);
    let request = BackfillRequest::new(Feed::Central, "RACE", fixture_date())
        .to_date(fixture_date());

    let result = coordinator
        .run_backfill(&request, &no_cancel())
        .await
        .unwrap();

    assert_eq!(result.stats.imported, 6);
    assert_eq!(store.row_count("NL_RA"), 3);
}

/// Regional feed: 20 records, a -502, then recovery on a second open whose
/// download count reached zero; nothing is delivered twice
#[tokio::test(start_paused = true)]
async fn regional_server_error_recovers_with_skip_files() {
    let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let mut steps = Vec::new();
    for race in 1..=20 {
        steps.push(ReadStep::record(
            format!("F{}.dat", race),
            ra_record_on(date, race),
        ));
    }
    // Close out the last file, then the server dies
    steps.push(ReadStep::code(-1, "F20.dat"));
    steps.push(ReadStep::code(-502, ""));
    // Second pass: the vendor re-delivers two finished files (filtered by
    // the skip set), then ten new ones, and completes
    steps.push(ReadStep::record("F1.dat", ra_record_on(date, 1)));
    steps.push(ReadStep::record("F2.dat", ra_record_on(date, 2)));
    for race in 21..=30 {
        steps.push(ReadStep::record(
            format!("F{}.dat", race),
            ra_record_on(date, race),
        ));
    }

    let session = ScriptedSession::new()
        .push_open_ok(20, 5)
        .push_open_ok(10, 0)
        .push_steps(steps);

    let (mut coordinator, store) = coordinator(vec![session], 1000);
    let request = BackfillRequest::new(Feed::Regional, "RACE", date).to_date(date);

    let result = coordinator
        .run_backfill(&request, &no_cancel())
        .await
        .unwrap();

    assert_eq!(result.status, RunStatus::Completed);
    assert_eq!(result.stats.imported, 30);
    assert!(result.stats.retries >= 1);
    // No duplicates by primary key
    assert_eq!(store.row_count("NL_RA_REG"), 30);
}

/// A corrupted file is deleted through the vendor and costs exactly one
/// failed record; the run still completes
#[tokio::test(start_paused = true)]
async fn corrupted_file_recovers_locally() {
    let log: umalink_session::CallLog = Arc::new(Mutex::new(Vec::new()));
    let mut steps = Vec::new();
    for race in 1..=16 {
        steps.push(ReadStep::record(format!("F{}.dat", race), ra_record(race)));
    }
    steps.push(ReadStep::code(-402, "F17.dat"));
    for race in 18..=20 {
        steps.push(ReadStep::record(format!("F{}.dat", race), ra_record(race)));
    }
    let session = ScriptedSession::new()
        .with_call_log(Arc::clone(&log))
        .push_open_ok(20, 0)
        .push_steps(steps);

    let (mut coordinator, store) = coordinator(vec![session], 1000);
    let request = BackfillRequest::new(Feed::Central, "RACE", fixture_date())
        .to_date(fixture_date());

    let result = coordinator
        .run_backfill(&request, &no_cancel())
        .await
        .unwrap();

    assert_eq!(result.status, RunStatus::CompletedWithErrors);
    assert_eq!(result.stats.failed, 1);
    assert_eq!(store.row_count("NL_RA"), 19);

    let deletes: Vec<String> = log
        .lock()
        .unwrap()
        .iter()
        .filter(|entry| entry.starts_with("delete:"))
        .cloned()
        .collect();
    assert_eq!(deletes, vec!["delete:F17.dat".to_string()]);
}

/// Win odds bytes "0035" surface as the real value 3.5 in the stored row
#[tokio::test(start_paused = true)]
async fn odds_scale_lands_in_store() {
    let session = ScriptedSession::new()
        .push_open_ok(1, 0)
        .push_steps([ReadStep::record("ODDS.dat", o1_record_with_win_odds())]);

    let (mut coordinator, store) = coordinator(vec![session], 1000);
    let request = BackfillRequest::new(Feed::Central, "O1", fixture_date())
        .to_date(fixture_date());

    let result = coordinator
        .run_backfill(&request, &no_cancel())
        .await
        .unwrap();

    assert_eq!(result.status, RunStatus::Completed);
    assert_eq!(store.row_count("NL_O1"), 1);

    // Key: race identity + horse number
    let key = vec![
        "2024".to_string(),
        "601".to_string(),
        "05".to_string(),
        "3".to_string(),
        "1".to_string(),
        "11".to_string(),
        "1".to_string(),
    ];
    let row = store.row("NL_O1", &key).expect("odds row present");
    assert!(
        row.contains(&umalink_codec::FieldValue::Real(3.5)),
        "expected 3.5 in {:?}",
        row
    );
}

/// Client-side to-date filter drops records past the requested boundary
#[tokio::test(start_paused = true)]
async fn to_date_is_enforced_client_side() {
    let in_range = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let past_range = chrono::NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
    let session = ScriptedSession::new().push_open_ok(2, 0).push_steps([
        ReadStep::record("A.dat", ra_record_on(in_range, 1)),
        ReadStep::record("A.dat", ra_record_on(past_range, 2)),
    ]);

    let (mut coordinator, store) = coordinator(vec![session], 1000);
    let request =
        BackfillRequest::new(Feed::Central, "RACE", in_range).to_date(in_range);

    let result = coordinator
        .run_backfill(&request, &no_cancel())
        .await
        .unwrap();

    assert_eq!(result.stats.fetched, 2);
    assert_eq!(result.stats.imported, 1);
    assert_eq!(store.row_count("NL_RA"), 1);
}

/// Cancellation before the first chunk returns a cancelled result and
/// writes nothing
#[tokio::test(start_paused = true)]
async fn cancellation_is_cooperative() {
    let session = ScriptedSession::new()
        .push_open_ok(100, 0)
        .push_records_per_file("RA", umalink_parsers::layouts::RA.length, 5);
    let (mut coordinator, store) = coordinator(vec![session], 1000);
    let request = BackfillRequest::new(Feed::Central, "RACE", fixture_date())
        .to_date(fixture_date());

    let (cancel_tx, cancel_rx) = watch::channel(true);
    let result = coordinator.run_backfill(&request, &cancel_rx).await.unwrap();
    drop(cancel_tx);

    assert_eq!(result.status, RunStatus::Cancelled);
    assert_eq!(store.row_count("NL_RA"), 0);
}

/// A run resumes after the last completed chunk recorded in the state file
#[tokio::test(start_paused = true)]
async fn resume_skips_completed_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let day1 = chrono::NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    let day2 = chrono::NaiveDate::from_ymd_opt(2025, 2, 2).unwrap();

    // State left behind by an interrupted run: day 1 already written
    let mut state = umalink_ingest::ResumeState::new("RACE", "regional", day1, Some(day2));
    state.last_completed_chunk = Some(day1);
    state
        .save(&umalink_ingest::ResumeState::path_for(
            dir.path(),
            "regional",
            "RACE",
        ))
        .unwrap();

    // Only day 2's session exists; resuming must never open day 1
    let log: umalink_session::CallLog = Arc::new(Mutex::new(Vec::new()));
    let session = ScriptedSession::new()
        .with_call_log(Arc::clone(&log))
        .push_open_ok(1, 0)
        .push_steps([ReadStep::record("D2.dat", ra_record_on(day2, 2))]);
    let (coordinator, store) = coordinator(vec![session], 1000);
    let mut coordinator = coordinator.with_state_dir(dir.path());

    let request = BackfillRequest::new(Feed::Regional, "RACE", day1).to_date(day2);
    let result = coordinator
        .run_backfill(&request, &no_cancel())
        .await
        .unwrap();

    assert_eq!(result.status, RunStatus::Completed);
    assert_eq!(store.row_count("NL_RA_REG"), 1);

    let opens: Vec<String> = log
        .lock()
        .unwrap()
        .iter()
        .filter(|entry| entry.starts_with("open:"))
        .cloned()
        .collect();
    assert_eq!(opens, vec!["open:RACE:20250202000000:3".to_string()]);
}
