#![allow(dead_code)]

//! Shared fixtures for the end-to-end scenarios

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use umalink_ingest::{Coordinator, SessionFactory};
use umalink_session::{ScriptedSession, VendorSession};
use umalink_writer::{MemoryDriver, MemoryState, Writer, WriterConfig};

/// Build a record buffer of a kind's declared length with ASCII runs poked
/// in at fixed offsets
pub fn record(kind: &str, length: usize, fields: &[(usize, &str)]) -> Vec<u8> {
    let mut buf = vec![b' '; length];
    buf[..2].copy_from_slice(kind.as_bytes());
    for (offset, value) in fields {
        buf[*offset..*offset + value.len()].copy_from_slice(value.as_bytes());
    }
    buf
}

/// An RA record for race `race_num` on 2024-06-01 at venue 05
pub fn ra_record(race_num: u32) -> Vec<u8> {
    record(
        "RA",
        umalink_parsers::layouts::RA.length,
        &[
            (2, "1"),
            (3, "20240601"),
            (11, "2024"),
            (15, "0601"),
            (19, "05"),
            (21, "03"),
            (23, "01"),
            (25, &format!("{:02}", race_num)),
            (697, "1600"),
        ],
    )
}

/// An SE record for a runner in race `race_num`
pub fn se_record(race_num: u32, horse: u32) -> Vec<u8> {
    record(
        "SE",
        umalink_parsers::layouts::SE.length,
        &[
            (2, "1"),
            (3, "20240601"),
            (11, "2024"),
            (15, "0601"),
            (19, "05"),
            (21, "03"),
            (23, "01"),
            (25, &format!("{:02}", race_num)),
            (28, &format!("{:02}", horse)),
            (30, &format!("20190{:05}", horse)),
        ],
    )
}

/// An RA record on an arbitrary date (regional scenarios)
pub fn ra_record_on(date: NaiveDate, race_num: u32) -> Vec<u8> {
    let year = date.format("%Y").to_string();
    let month_day = date.format("%m%d").to_string();
    let make = date.format("%Y%m%d").to_string();
    record(
        "RA",
        umalink_parsers::layouts::RA.length,
        &[
            (2, "1"),
            (3, &make),
            (11, &year),
            (15, &month_day),
            (19, "30"),
            (21, "01"),
            (23, "01"),
            (25, &format!("{:02}", race_num)),
        ],
    )
}

/// An O1 record whose first win-odds element reads 3.5 for horse 1
pub fn o1_record_with_win_odds() -> Vec<u8> {
    record(
        "O1",
        umalink_parsers::layouts::O1.length,
        &[
            (2, "1"),
            (3, "20240601"),
            (11, "2024"),
            (15, "0601"),
            (19, "05"),
            (21, "03"),
            (23, "01"),
            (25, "11"),
            (43, "01"),
            (45, "0035"),
            (49, "02"),
        ],
    )
}

/// Session factory that hands out prepared sessions in order and then
/// empty ones
pub fn factory_of(sessions: Vec<ScriptedSession>) -> SessionFactory {
    let queue = Arc::new(Mutex::new(
        sessions.into_iter().collect::<VecDeque<ScriptedSession>>(),
    ));
    Box::new(move || {
        let next = queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ScriptedSession::new().push_rt_open(-1, 0));
        Box::new(next) as Box<dyn VendorSession>
    })
}

/// Coordinator over an in-memory store; returns the store handle for
/// assertions
pub fn coordinator(sessions: Vec<ScriptedSession>, batch_size: usize) -> (Coordinator, MemoryState) {
    let driver = MemoryDriver::new();
    let state = driver.state();
    let writer = Writer::new(
        Box::new(driver),
        WriterConfig::with_batch_size(batch_size),
    );
    let coordinator = Coordinator::new(writer, factory_of(sessions), "TESTKEY").unwrap();
    (coordinator, state)
}

/// June 1st 2024, the date the central fixtures use
pub fn fixture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}
