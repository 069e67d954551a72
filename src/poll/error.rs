//! Ways a wait can end without a terminal run.

use std::time::Duration;

use thiserror::Error;

use crate::error::AgentsError;
use crate::types::Run;

/// Failure of [`wait_until_terminal`](super::wait_until_terminal).
///
/// A run that reached status `failed` is not one of these: it is returned
/// as a normal result with its `last_error` populated.
#[derive(Error, Debug)]
pub enum PollError {
    /// Fetching the run status failed. Not retried.
    #[error("Transport error while polling: {0}")]
    Transport(#[source] AgentsError),

    /// `max_wait` elapsed while the run was still non-terminal.
    #[error("Run {} still {} after {:?}", .last_run.id, .last_run.status, .waited)]
    TimeoutExceeded { waited: Duration, last_run: Box<Run> },

    /// The caller's cancellation token fired.
    #[error("Polling canceled after {polls} status fetch(es)")]
    Cancelled { polls: u32 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl PollError {
    /// Last observed run, when the wait timed out.
    pub fn last_run(&self) -> Option<&Run> {
        match self {
            Self::TimeoutExceeded { last_run, .. } => Some(last_run),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimeoutExceeded { .. })
    }

    /// Underlying service error, for transport failures.
    pub fn transport_error(&self) -> Option<&AgentsError> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AgentsError> for PollError {
    fn from(err: AgentsError) -> Self {
        Self::Transport(err)
    }
}
