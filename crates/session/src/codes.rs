//! Vendor result codes and their classification
//!
//! The numeric vocabulary is the vendor's; the reactions are ours. Every
//! code the session manager must handle explicitly is named here so the
//! control flow never compares against bare numbers.

/// Documented vendor result codes
pub mod code {
    /// Success / done
    pub const OK: i32 = 0;
    /// Data boundary (file switch), not an error
    pub const FILE_BOUNDARY: i32 = -1;
    /// File not yet downloaded (regional feed); keep reading
    pub const NOT_DOWNLOADED: i32 = -3;
    /// Authentication not configured
    pub const AUTH_NOT_SET: i32 = -100;
    /// Data spec not supported by the contract
    pub const UNSUPPORTED_SPEC: i32 = -116;
    /// Vendor-side "other" error, usually initial setup incomplete
    pub const SETUP_INCOMPLETE: i32 = -203;
    /// Authentication failure / unknown init key
    pub const AUTH_ERROR: i32 = -301;
    /// Corrupted file (checksum)
    pub const FILE_CORRUPT: i32 = -402;
    /// Corrupted file (structure)
    pub const FILE_BROKEN: i32 = -403;
    /// Rate limit from the vendor's download servers
    pub const RATE_LIMIT: i32 = -421;
    /// Download failed
    pub const DOWNLOAD_FAILED: i32 = -502;
    /// Server error
    pub const SERVER_ERROR: i32 = -503;
}

/// How the manager reacts to a `read_record` result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadReaction {
    /// Positive length: a record was delivered
    Record,
    /// End of stream
    Done,
    /// File boundary; continue reading
    FileSwitch,
    /// Regional "not yet downloaded"; continue reading
    Continue,
    /// Damaged file: delete it via `file_delete` and continue
    DeleteFile,
    /// Transport failure: close, wait, reopen with skip-files
    Reopen,
    /// Unrecoverable for this run
    Fatal,
}

/// Classify a `read_record` result code
pub fn classify_read(result: i32) -> ReadReaction {
    if result > 0 {
        return ReadReaction::Record;
    }
    match result {
        code::OK => ReadReaction::Done,
        code::FILE_BOUNDARY => ReadReaction::FileSwitch,
        code::NOT_DOWNLOADED => ReadReaction::Continue,
        code::FILE_CORRUPT | code::FILE_BROKEN => ReadReaction::DeleteFile,
        code::SETUP_INCOMPLETE | code::DOWNLOAD_FAILED | code::SERVER_ERROR => {
            ReadReaction::Reopen
        }
        _ => ReadReaction::Fatal,
    }
}

/// How the manager reacts to a `status` poll during download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusReaction {
    /// Download complete; move to reading
    Complete,
    /// Still downloading; the value is the vendor's progress figure
    InProgress(i32),
    /// Rate-limited; back off then poll again
    RateLimit,
    /// Server-side failure; close, wait, reopen with skip-files
    Reopen,
    /// Unrecoverable for this run
    Fatal,
}

/// Classify a `status` result code
pub fn classify_status(result: i32) -> StatusReaction {
    if result > 0 {
        return StatusReaction::InProgress(result);
    }
    match result {
        code::OK => StatusReaction::Complete,
        code::RATE_LIMIT => StatusReaction::RateLimit,
        code::SETUP_INCOMPLETE | code::DOWNLOAD_FAILED | code::SERVER_ERROR => {
            StatusReaction::Reopen
        }
        _ => StatusReaction::Fatal,
    }
}

/// True if an `open` result code is fatal for the whole run
pub fn open_is_fatal(result: i32) -> bool {
    matches!(
        result,
        code::AUTH_NOT_SET | code::AUTH_ERROR | code::UNSUPPORTED_SPEC
    )
}
