//! Status poll failures.

use thiserror::Error;

use crate::traits::HttpError;

/// Reasons a poll cycle did not yield a status document.
#[derive(Debug, Clone, Error)]
pub enum PollError {
    /// Network unreachable, connection refused, timeout.
    #[error("transport failure: {0}")]
    Transport(#[from] HttpError),

    /// The endpoint answered with a non-2xx status.
    #[error("status endpoint returned HTTP {status}")]
    Status { status: u16 },

    /// The body was not a JSON object.
    #[error("malformed status document: {0}")]
    Parse(String),
}

impl PollError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            PollError::Transport(HttpError::Timeout(_)) => "E_POLL_TIMEOUT",
            PollError::Transport(_) => "E_POLL_TRANSPORT",
            PollError::Status { .. } => "E_POLL_STATUS",
            PollError::Parse(_) => "E_POLL_PARSE",
        }
    }
}
