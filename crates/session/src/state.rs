//! Session state machine states

use std::fmt;

/// States of one vendor session
///
/// `FailedRetryable` is the close-wait-reopen detour; `Failed` is the sink
/// state. Transitions are driven by the manager, never by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialised,
    Initialised,
    Opening,
    Downloading,
    Reading,
    Closed,
    FailedRetryable,
    Failed,
}

impl SessionState {
    /// Stable lowercase name for logs
    pub const fn as_str(self) -> &'static str {
        match self {
            SessionState::Uninitialised => "uninitialised",
            SessionState::Initialised => "initialised",
            SessionState::Opening => "opening",
            SessionState::Downloading => "downloading",
            SessionState::Reading => "reading",
            SessionState::Closed => "closed",
            SessionState::FailedRetryable => "failed-retryable",
            SessionState::Failed => "failed",
        }
    }

    /// True for the two terminal states
    pub const fn is_terminal(self) -> bool {
        matches!(self, SessionState::Closed | SessionState::Failed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
