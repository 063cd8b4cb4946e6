//! Scripted vendor session for tests
//!
//! Plays back a prepared sequence of read results and open replies, and
//! records the calls it receives. Integration tests build the exact vendor
//! behaviour a scenario needs (clean stream, damaged file, server failure
//! with shrinking download counts) without any platform component.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use crate::vendor::{OpenReply, ReadReply, RtOpenReply, VendorSession};

/// Shared call log for assertions after the session moved into a manager
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// One step of the scripted read sequence
#[derive(Debug, Clone)]
pub enum ReadStep {
    /// Deliver a record from `file`
    Record { file: String, data: Vec<u8> },
    /// Return a bare result code (boundaries, damage, failures)
    Code { code: i32, file: String },
}

impl ReadStep {
    /// A record step
    pub fn record(file: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        ReadStep::Record {
            file: file.into(),
            data: data.into(),
        }
    }

    /// A result-code step
    pub fn code(code: i32, file: impl Into<String>) -> Self {
        ReadStep::Code {
            code,
            file: file.into(),
        }
    }
}

/// Scripted in-memory vendor session
#[derive(Debug, Default)]
pub struct ScriptedSession {
    /// Result of `initialise`
    init_code: i32,
    /// Replies for successive `open` calls; the last one repeats
    opens: VecDeque<OpenReply>,
    /// Replies for successive `real_time_open` calls; the last one repeats
    rt_opens: VecDeque<RtOpenReply>,
    /// Status codes for successive polls; empty means immediately complete
    statuses: VecDeque<i32>,
    /// The read sequence
    script: VecDeque<ReadStep>,
    /// Calls observed, newest last
    pub initialised_with: Vec<String>,
    pub opened_with: Vec<(String, String, i32)>,
    pub deleted_files: Vec<String>,
    pub skipped: u32,
    pub closes: u32,
    /// Optional shared mirror of the observed calls
    log: Option<CallLog>,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `initialise` result
    pub fn with_init_code(mut self, code: i32) -> Self {
        self.init_code = code;
        self
    }

    /// Mirror observed calls into a shared log
    ///
    /// Needed when the session moves into a manager that a spawned task
    /// consumes, leaving no direct handle to assert against.
    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.log = Some(log);
        self
    }

    fn note(&self, entry: String) {
        if let Some(log) = &self.log {
            if let Ok(mut log) = log.lock() {
                log.push(entry);
            }
        }
    }

    /// Queue an `open` reply
    pub fn push_open(mut self, reply: OpenReply) -> Self {
        self.opens.push_back(reply);
        self
    }

    /// Queue a successful `open` with the given download count
    pub fn push_open_ok(self, read_count: i32, download_count: i32) -> Self {
        self.push_open(OpenReply {
            code: 0,
            read_count,
            download_count,
            last_file_ts: "20240601120000".to_string(),
        })
    }

    /// Queue a `real_time_open` reply
    pub fn push_rt_open(mut self, code: i32, read_count: i32) -> Self {
        self.rt_opens.push_back(RtOpenReply { code, read_count });
        self
    }

    /// Queue status codes for the download wait
    pub fn push_statuses(mut self, codes: &[i32]) -> Self {
        self.statuses.extend(codes.iter().copied());
        self
    }

    /// Append steps to the read script
    pub fn push_steps(mut self, steps: impl IntoIterator<Item = ReadStep>) -> Self {
        self.script.extend(steps);
        self
    }

    /// Append `count` records, one per file (`F1.dat`, `F2.dat`, ...)
    pub fn push_records_per_file(mut self, kind: &str, length: usize, count: u32) -> Self {
        for index in 1..=count {
            let mut data = vec![b' '; length];
            data[..2].copy_from_slice(kind.as_bytes());
            self.script.push_back(ReadStep::Record {
                file: format!("F{}.dat", index),
                data,
            });
        }
        self
    }
}

#[async_trait]
impl VendorSession for ScriptedSession {
    async fn initialise(&mut self, service_key: &str) -> i32 {
        self.note(format!("init:{}", service_key));
        self.initialised_with.push(service_key.to_string());
        self.init_code
    }

    async fn open(&mut self, data_spec: &str, from_time: &str, option: i32) -> OpenReply {
        self.note(format!("open:{}:{}:{}", data_spec, from_time, option));
        self.opened_with
            .push((data_spec.to_string(), from_time.to_string(), option));
        match self.opens.len() {
            0 => OpenReply {
                code: 0,
                ..OpenReply::default()
            },
            1 => self.opens.front().cloned().unwrap_or_default(),
            _ => self.opens.pop_front().unwrap_or_default(),
        }
    }

    async fn real_time_open(&mut self, data_spec: &str, _key: &str) -> RtOpenReply {
        self.opened_with
            .push((data_spec.to_string(), String::new(), -1));
        match self.rt_opens.len() {
            0 => RtOpenReply {
                code: 0,
                read_count: 0,
            },
            1 => self.rt_opens.front().cloned().unwrap_or_default(),
            _ => self.rt_opens.pop_front().unwrap_or_default(),
        }
    }

    async fn status(&mut self) -> i32 {
        self.statuses.pop_front().unwrap_or(0)
    }

    async fn read_record(&mut self, _buffer_size: usize) -> ReadReply {
        match self.script.pop_front() {
            Some(ReadStep::Record { file, data }) => ReadReply {
                code: data.len() as i32,
                data: Some(Bytes::from(data)),
                file_name: file,
            },
            Some(ReadStep::Code { code, file }) => ReadReply {
                code,
                data: None,
                file_name: file,
            },
            None => ReadReply {
                code: 0,
                data: None,
                file_name: String::new(),
            },
        }
    }

    async fn skip(&mut self) {
        self.note("skip".to_string());
        self.skipped += 1;
    }

    async fn file_delete(&mut self, file_name: &str) -> i32 {
        self.note(format!("delete:{}", file_name));
        self.deleted_files.push(file_name.to_string());
        0
    }

    async fn close(&mut self) -> i32 {
        self.note("close".to_string());
        self.closes += 1;
        0
    }
}
