//! The opaque vendor session call surface

use async_trait::async_trait;
use bytes::Bytes;

/// Reply from `open`
#[derive(Debug, Clone, Default)]
pub struct OpenReply {
    pub code: i32,
    /// Number of records the vendor announces for reading
    pub read_count: i32,
    /// Number of files still to download before reading can finish
    pub download_count: i32,
    /// Timestamp of the newest file the vendor holds, `YYYYMMDDhhmmss`
    pub last_file_ts: String,
}

/// Reply from `real_time_open`
#[derive(Debug, Clone, Default)]
pub struct RtOpenReply {
    pub code: i32,
    pub read_count: i32,
}

/// Reply from `read_record`
#[derive(Debug, Clone, Default)]
pub struct ReadReply {
    /// Positive: record length in bytes; zero/negative: see the code table
    pub code: i32,
    /// Record bytes when `code > 0`
    pub data: Option<Bytes>,
    /// Vendor file the read position is in (also set on error codes)
    pub file_name: String,
}

/// Minimal call surface of the vendor component
///
/// One implementation wraps the platform bridge object; the scripted stub
/// implements it for tests. Calls are not safe for concurrent use - the
/// manager serialises them by owning the object exclusively.
#[async_trait]
pub trait VendorSession: Send {
    /// Initialise with the service key; `0` means ready
    async fn initialise(&mut self, service_key: &str) -> i32;

    /// Open a historical stream; may block for minutes while downloading
    async fn open(&mut self, data_spec: &str, from_time: &str, option: i32) -> OpenReply;

    /// Open a real-time stream; the vendor returns only data newer than the
    /// previous call, so no `from_time` is taken
    async fn real_time_open(&mut self, data_spec: &str, key: &str) -> RtOpenReply;

    /// Poll download progress
    async fn status(&mut self) -> i32;

    /// Read the next record
    async fn read_record(&mut self, buffer_size: usize) -> ReadReply;

    /// Skip the current record
    async fn skip(&mut self);

    /// Ask the vendor to delete a damaged cached file
    async fn file_delete(&mut self, file_name: &str) -> i32;

    /// Release the stream
    async fn close(&mut self) -> i32;
}

#[async_trait]
impl VendorSession for Box<dyn VendorSession> {
    async fn initialise(&mut self, service_key: &str) -> i32 {
        (**self).initialise(service_key).await
    }

    async fn open(&mut self, data_spec: &str, from_time: &str, option: i32) -> OpenReply {
        (**self).open(data_spec, from_time, option).await
    }

    async fn real_time_open(&mut self, data_spec: &str, key: &str) -> RtOpenReply {
        (**self).real_time_open(data_spec, key).await
    }

    async fn status(&mut self) -> i32 {
        (**self).status().await
    }

    async fn read_record(&mut self, buffer_size: usize) -> ReadReply {
        (**self).read_record(buffer_size).await
    }

    async fn skip(&mut self) {
        (**self).skip().await
    }

    async fn file_delete(&mut self, file_name: &str) -> i32 {
        (**self).file_delete(file_name).await
    }

    async fn close(&mut self) -> i32 {
        (**self).close().await
    }
}
