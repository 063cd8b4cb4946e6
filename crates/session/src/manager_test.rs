//! Tests for the session manager state machine
//!
//! All tests run on the paused tokio clock so back-off and reopen waits
//! complete instantly.

use tokio::sync::{mpsc, watch};
use umalink_codec::RecordBuffer;
use umalink_parsers::Feed;

use crate::stub::{ReadStep, ScriptedSession};
use crate::{
    FeedPolicy, FetchSummary, SessionConfig, SessionError, SessionManager, SessionState, SkipFiles,
};

fn manager(session: ScriptedSession, feed: Feed) -> SessionManager<ScriptedSession> {
    SessionManager::new(session, FeedPolicy::new(feed), SessionConfig::default())
}

fn channel() -> (
    mpsc::Sender<RecordBuffer>,
    mpsc::Receiver<RecordBuffer>,
    watch::Receiver<bool>,
    watch::Sender<bool>,
) {
    let (tx, rx) = mpsc::channel(256);
    let (cancel_tx, cancel_rx) = watch::channel(false);
    (tx, rx, cancel_rx, cancel_tx)
}

async fn run_to_summary(
    manager: &mut SessionManager<ScriptedSession>,
    sink: mpsc::Sender<RecordBuffer>,
    cancel: watch::Receiver<bool>,
) -> crate::Result<FetchSummary> {
    manager.run("RACE", "20240601000000", 1, "KEY", &cancel, &sink).await
}

// =============================================================================
// Clean path
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_clean_session_delivers_in_order() {
    let session = ScriptedSession::new()
        .push_open_ok(3, 0)
        .push_steps([
            ReadStep::record("F1.dat", b"RA rest".to_vec()),
            ReadStep::record("F1.dat", b"SE rest".to_vec()),
            ReadStep::record("F2.dat", b"SE more".to_vec()),
        ]);
    let mut manager = manager(session, Feed::Central);
    let (tx, mut rx, cancel, _cancel_tx) = channel();

    let summary = run_to_summary(&mut manager, tx, cancel).await.unwrap();

    assert_eq!(summary.records_fetched, 3);
    assert!(summary.completed);
    assert!(!summary.cancelled);
    assert_eq!(manager.state(), SessionState::Closed);
    // Both files were fully delivered
    assert!(summary.skip_files.contains("F1.dat"));
    assert!(summary.skip_files.contains("F2.dat"));

    // Delivery order is the vendor's order
    let first = rx.recv().await.unwrap();
    assert_eq!(first.kind().unwrap(), "RA");
    assert_eq!(first.file_name(), "F1.dat");
    let second = rx.recv().await.unwrap();
    assert_eq!(second.kind().unwrap(), "SE");
}

#[tokio::test(start_paused = true)]
async fn test_download_wait_then_read() {
    let session = ScriptedSession::new()
        .push_open_ok(1, 4)
        .push_statuses(&[4, 3, 1, 0])
        .push_steps([ReadStep::record("F1.dat", b"WE data".to_vec())]);
    let mut manager = manager(session, Feed::Central);
    let (tx, _rx, cancel, _cancel_tx) = channel();

    let summary = run_to_summary(&mut manager, tx, cancel).await.unwrap();

    assert_eq!(summary.records_fetched, 1);
    assert!(manager
        .transitions()
        .contains(&SessionState::Downloading));
}

// =============================================================================
// Skip-files
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_previously_delivered_files_are_skipped() {
    let session = ScriptedSession::new().push_open_ok(2, 0).push_steps([
        ReadStep::record("F1.dat", b"RA old".to_vec()),
        ReadStep::record("F2.dat", b"RA new".to_vec()),
    ]);
    let skip: SkipFiles = ["F1.dat".to_string()].into_iter().collect();
    let mut manager = manager(session, Feed::Central).with_skip_files(skip);
    let (tx, mut rx, cancel, _cancel_tx) = channel();

    let summary = run_to_summary(&mut manager, tx, cancel).await.unwrap();

    assert_eq!(summary.records_fetched, 1);
    assert_eq!(summary.records_skipped, 1);
    assert_eq!(manager.session().skipped, 1);
    assert_eq!(rx.recv().await.unwrap().file_name(), "F2.dat");
}

// =============================================================================
// Damaged files
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_damaged_file_is_deleted_and_run_continues() {
    let session = ScriptedSession::new().push_open_ok(3, 0).push_steps([
        ReadStep::record("F16.dat", b"RA one".to_vec()),
        ReadStep::code(-402, "F17.dat"),
        ReadStep::record("F18.dat", b"RA two".to_vec()),
    ]);
    let mut manager = manager(session, Feed::Central);
    let (tx, _rx, cancel, _cancel_tx) = channel();

    let summary = run_to_summary(&mut manager, tx, cancel).await.unwrap();

    assert!(summary.completed);
    assert_eq!(summary.records_fetched, 2);
    assert_eq!(summary.records_failed, 1);
    assert_eq!(manager.session().deleted_files, vec!["F17.dat".to_string()]);
}

// =============================================================================
// Server failure and recovery
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_server_error_reopens_with_skip_files() {
    let session = ScriptedSession::new()
        .push_open_ok(3, 5)
        .push_open_ok(2, 0)
        .push_steps([
            // First pass: F1 delivered, then the server dies inside F2
            ReadStep::record("F1.dat", b"RA aa".to_vec()),
            ReadStep::record("F2.dat", b"RA bb".to_vec()),
            ReadStep::code(-502, "F2.dat"),
            // Second pass: vendor re-delivers F1 (skipped) and F2, then new data
            ReadStep::record("F1.dat", b"RA aa".to_vec()),
            ReadStep::record("F2.dat", b"RA bb".to_vec()),
            ReadStep::record("F3.dat", b"RA cc".to_vec()),
        ]);
    let mut manager = manager(session, Feed::Regional);
    let (tx, _rx, cancel, _cancel_tx) = channel();

    let summary = run_to_summary(&mut manager, tx, cancel).await.unwrap();

    assert!(summary.completed);
    assert_eq!(summary.retries, 1);
    // F2 was in progress when the server died, so it re-delivers and
    // upserts; only F1 is filtered
    assert_eq!(summary.records_skipped, 1);
    assert_eq!(summary.records_fetched, 4);

    let transitions = manager.transitions();
    let wanted = [
        SessionState::Reading,
        SessionState::FailedRetryable,
        SessionState::Opening,
        SessionState::Reading,
        SessionState::Closed,
    ];
    let mut at = 0;
    for state in transitions {
        if at < wanted.len() && *state == wanted[at] {
            at += 1;
        }
    }
    assert_eq!(at, wanted.len(), "transitions missing: {:?}", transitions);
}

#[tokio::test(start_paused = true)]
async fn test_regional_completion_waits_for_zero_download_count() {
    // First pass ends cleanly, but the open announced three files still to
    // download; the regional oracle reopens until an open announces zero
    let session = ScriptedSession::new()
        .push_open_ok(2, 3)
        .push_open_ok(0, 0)
        .push_steps([
            ReadStep::record("F1.dat", b"RA one".to_vec()),
            ReadStep::record("F2.dat", b"RA two".to_vec()),
        ]);
    let mut manager = manager(session, Feed::Regional);
    let (tx, _rx, cancel, _cancel_tx) = channel();

    let summary = run_to_summary(&mut manager, tx, cancel).await.unwrap();

    assert!(summary.completed);
    assert_eq!(summary.records_fetched, 2);
    assert_eq!(summary.retries, 1);
    assert_eq!(manager.state(), SessionState::Closed);
}

#[tokio::test(start_paused = true)]
async fn test_central_completion_trusts_end_of_stream() {
    // Same shape on the central feed: no verification reopen
    let session = ScriptedSession::new()
        .push_open_ok(2, 3)
        .push_steps([
            ReadStep::record("F1.dat", b"RA one".to_vec()),
            ReadStep::record("F2.dat", b"RA two".to_vec()),
        ]);
    let mut manager = manager(session, Feed::Central);
    let (tx, _rx, cancel, _cancel_tx) = channel();

    let summary = run_to_summary(&mut manager, tx, cancel).await.unwrap();

    assert!(summary.completed);
    assert_eq!(summary.records_fetched, 2);
    assert_eq!(summary.retries, 0);
}

#[tokio::test(start_paused = true)]
async fn test_retry_budget_exhausts() {
    let session = ScriptedSession::new().push_open(crate::OpenReply {
        code: -502,
        ..crate::OpenReply::default()
    });
    let mut manager = manager(session, Feed::Regional);
    let (tx, _rx, cancel, _cancel_tx) = channel();

    let err = run_to_summary(&mut manager, tx, cancel).await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::RetriesExhausted {
            attempts: 5,
            last_code: -502
        }
    ));
    assert_eq!(manager.state(), SessionState::Failed);
}

// =============================================================================
// Auth and option policy
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_regional_auth_error_names_the_remedy() {
    let session = ScriptedSession::new().with_init_code(-301);
    let mut manager = manager(session, Feed::Regional);
    let (tx, _rx, cancel, _cancel_tx) = channel();

    let err = run_to_summary(&mut manager, tx, cancel).await.unwrap_err();

    match err {
        SessionError::Auth { code, remedy } => {
            assert_eq!(code, -301);
            assert!(remedy.contains("UNKNOWN"));
        }
        other => panic!("expected auth error, got {}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_regional_feed_remaps_open_option() {
    let session = ScriptedSession::new().push_open_ok(0, 0);
    let mut manager = manager(session, Feed::Regional);
    let (tx, _rx, cancel, _cancel_tx) = channel();

    run_to_summary(&mut manager, tx, cancel).await.unwrap();

    let session = manager.session();
    assert_eq!(session.opened_with[0].2, 3, "option 1 must remap to 3");
    // Regional init key is the documented literal
    assert_eq!(session.initialised_with, vec!["UNKNOWN".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_central_feed_passes_key_and_option_through() {
    let session = ScriptedSession::new().push_open_ok(0, 0);
    let mut manager = manager(session, Feed::Central);
    let (tx, _rx, cancel, _cancel_tx) = channel();

    run_to_summary(&mut manager, tx, cancel).await.unwrap();

    let session = manager.session();
    assert_eq!(session.opened_with[0].2, 1);
    assert_eq!(session.initialised_with, vec!["KEY".to_string()]);
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_cancellation_closes_cleanly() {
    let session = ScriptedSession::new()
        .push_open_ok(100, 0)
        .push_records_per_file("RA", 32, 100);
    let mut manager = manager(session, Feed::Central);
    let (tx, _rx, cancel, cancel_tx) = channel();
    cancel_tx.send(true).unwrap();

    let summary = run_to_summary(&mut manager, tx, cancel).await.unwrap();

    assert!(summary.cancelled);
    assert!(!summary.completed);
    assert_eq!(summary.records_fetched, 0);
    assert_eq!(manager.state(), SessionState::Closed);
    assert!(manager.session().closes >= 1);
}

// =============================================================================
// Real-time path
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_realtime_no_data_is_a_clean_empty_cycle() {
    let session = ScriptedSession::new().push_rt_open(-1, 0);
    let mut manager = manager(session, Feed::Central);
    let (tx, _rx, cancel, _cancel_tx) = channel();

    let summary = manager
        .run_realtime("0B12", "20240601", "KEY", &cancel, &tx)
        .await
        .unwrap();

    assert!(summary.completed);
    assert_eq!(summary.records_fetched, 0);
}

#[tokio::test(start_paused = true)]
async fn test_realtime_cycle_drains_records() {
    let session = ScriptedSession::new().push_rt_open(0, 2).push_steps([
        ReadStep::record("RT1.dat", b"RA live".to_vec()),
        ReadStep::record("RT1.dat", b"SE live".to_vec()),
    ]);
    let mut manager = manager(session, Feed::Central);
    let (tx, mut rx, cancel, _cancel_tx) = channel();

    let summary = manager
        .run_realtime("0B12", "20240601", "KEY", &cancel, &tx)
        .await
        .unwrap();

    assert!(summary.completed);
    assert_eq!(summary.records_fetched, 2);
    assert_eq!(rx.recv().await.unwrap().kind().unwrap(), "RA");
}
