//! src/error.rs
//!
//! Failure taxonomy for a single poll. Neither variant is fatal: the poller
//! reports it and tries again on the next tick.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The endpoint could not be reached, timed out, or answered with a
    /// non-success status.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The body was not the expected `/stats` JSON shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Short label used in logs and on the status line.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Malformed(_) => "malformed",
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
