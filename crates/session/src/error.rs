//! Session error types

use thiserror::Error;

use umalink_parsers::Feed;

/// Errors surfaced by the session layer
///
/// Recoverable conditions are handled inside the manager and show up in the
/// fetch summary as `retries`/`failed` counts; these variants are the ones
/// that end a run.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Authentication is missing or rejected; the operator must act
    #[error("vendor authentication failed (code {code}): {remedy}")]
    Auth { code: i32, remedy: String },

    /// The contract does not include this data spec
    #[error("data spec {spec} not supported by the vendor contract (code {code})")]
    UnsupportedSpec { code: i32, spec: String },

    /// A vendor call returned a code with no recovery
    #[error("vendor session failed during {phase} (code {code})")]
    Fatal { code: i32, phase: &'static str },

    /// The bounded reopen budget ran out
    #[error("retry budget exhausted after {attempts} attempts (last code {last_code})")]
    RetriesExhausted { attempts: u32, last_code: i32 },

    /// A vendor call exceeded its wrapping timeout
    #[error("vendor {call} timed out after {seconds} s")]
    Timeout { call: &'static str, seconds: u64 },

    /// The read loop hit its iteration ceiling
    #[error("read loop exceeded its {budget}-iteration budget")]
    ReadBudgetExceeded { budget: u32 },

    /// The record channel to the pipeline closed underneath the session
    #[error("record channel closed; pipeline is gone")]
    ChannelClosed,
}

impl SessionError {
    /// Auth error with the feed-appropriate remedy text
    pub fn auth(code: i32, feed: Feed) -> Self {
        let remedy = match feed {
            Feed::Central => {
                "configure the service key with the vendor's setup tool before retrying".to_string()
            }
            Feed::Regional => {
                "the regional feed's init key must be the literal string \"UNKNOWN\"".to_string()
            }
        };
        Self::Auth { code, remedy }
    }

    /// True if a fresh run (not a retry of this one) might succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SessionError::RetriesExhausted { .. } | SessionError::Timeout { .. }
        )
    }
}
