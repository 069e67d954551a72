//! Which statuses keep a wait going, and for how long.

use std::collections::HashSet;
use std::time::Duration;

use crate::types::RunStatus;

/// Interval used when none is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Polling configuration for [`wait_until_terminal`](super::wait_until_terminal).
///
/// Polls at a fixed interval; there is no backoff or jitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Statuses that continue polling.
    pub non_terminal: HashSet<RunStatus>,
    /// Raw unrecognized statuses to treat as terminal. Every other
    /// unrecognized status keeps polling.
    pub unknown_terminal: HashSet<String>,
    /// Pause between two status fetches. Must be non-zero.
    pub poll_interval: Duration,
    /// Wall-clock budget for the whole wait.
    pub max_wait: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            non_terminal: [
                RunStatus::Queued,
                RunStatus::InProgress,
                RunStatus::RequiresAction,
            ]
            .into_iter()
            .collect(),
            unknown_terminal: HashSet::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_wait: None,
        }
    }
}

impl PollPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    pub fn without_max_wait(mut self) -> Self {
        self.max_wait = None;
        self
    }

    /// Replace the set of statuses that continue polling.
    pub fn with_non_terminal(mut self, statuses: impl IntoIterator<Item = RunStatus>) -> Self {
        self.non_terminal = statuses.into_iter().collect();
        self
    }

    /// Return as soon as the run reports `requires_action`.
    ///
    /// The service will not move past that status until the caller submits
    /// tool outputs, so callers that handle required actions should use this
    /// and resume polling after submitting.
    pub fn stop_on_requires_action(mut self) -> Self {
        self.non_terminal.remove(&RunStatus::RequiresAction);
        self
    }

    /// Keep polling through `cancelling` until the run settles as `cancelled`.
    pub fn wait_through_cancelling(mut self) -> Self {
        self.non_terminal.insert(RunStatus::Cancelling);
        self
    }

    /// Treat one unrecognized raw status as terminal.
    pub fn treat_unknown_as_terminal(mut self, raw: impl Into<String>) -> Self {
        self.unknown_terminal.insert(raw.into());
        self
    }

    /// Whether observing `status` should lead to another fetch.
    pub fn keeps_polling(&self, status: &RunStatus) -> bool {
        match status {
            RunStatus::Unknown(raw) => {
                self.non_terminal.contains(status) || !self.unknown_terminal.contains(raw)
            }
            known => self.non_terminal.contains(known),
        }
    }
}
