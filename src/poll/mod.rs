//! Waiting for a remote run to reach a terminal status.
//!
//! [`wait_until_terminal`] repeatedly reads a run through a
//! [`RunStatusSource`] until the [`PollPolicy`] no longer asks for another
//! fetch. Sleeps between fetches are cancellation-aware: firing the
//! [`CancellationToken`] ends the wait at the next suspension point, and no
//! fetch is issued after that.
//!
//! ```no_run
//! use std::time::Duration;
//! use foundry_agents::poll::{wait_until_terminal, PollPolicy};
//! use foundry_agents::AgentsClient;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example(client: AgentsClient) -> Result<(), Box<dyn std::error::Error>> {
//! let runs = client.thread_runs("thread_abc");
//! let policy = PollPolicy::default().with_max_wait(Duration::from_secs(120));
//! let run = wait_until_terminal(&runs, "run_abc", &policy, &CancellationToken::new()).await?;
//! println!("run finished with status {}", run.status);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod policy;
pub mod source;

pub use error::PollError;
pub use policy::{PollPolicy, DEFAULT_POLL_INTERVAL};
pub use source::{RetryingSource, RunStatusSource};

use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::types::Run;

/// Poll `run_id` until its status stops matching `policy`.
///
/// Returns the final run, including runs that ended `failed`, `cancelled` or
/// `expired`. Fails with:
/// - [`PollError::Transport`] as soon as a fetch fails, without sleeping or retrying;
/// - [`PollError::TimeoutExceeded`] once `policy.max_wait` has elapsed, carrying the
///   last observed run; no fetch is issued after the deadline, and a fetch still in
///   flight at the deadline is abandoned (except the first, which has no run to report);
/// - [`PollError::Cancelled`] when `cancel` fires before, during, or between fetches.
pub async fn wait_until_terminal<S>(
    source: &S,
    run_id: &str,
    policy: &PollPolicy,
    cancel: &CancellationToken,
) -> Result<Run, PollError>
where
    S: RunStatusSource + ?Sized,
{
    if run_id.trim().is_empty() {
        return Err(PollError::InvalidArgument(
            "run id must not be empty".to_string(),
        ));
    }
    if policy.poll_interval.is_zero() {
        return Err(PollError::InvalidArgument(
            "poll interval must be greater than zero".to_string(),
        ));
    }

    let started = Instant::now();
    let deadline = policy.max_wait.map(|max_wait| started + max_wait);
    let mut polls: u32 = 0;
    let mut last_run: Option<Run> = None;

    loop {
        if cancel.is_cancelled() {
            return Err(PollError::Cancelled { polls });
        }

        // The first fetch always completes: a timeout reports an observed run.
        let cutoff = deadline.zip(last_run.take());
        let run = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PollError::Cancelled { polls }),
            previous = expire(cutoff) => return Err(timed_out(started, previous)),
            fetched = source.fetch_run(run_id) => fetched.map_err(PollError::Transport)?,
        };
        polls += 1;

        if !policy.keeps_polling(&run.status) {
            tracing::debug!(run_id, status = %run.status, polls, "run reached final status");
            return Ok(run);
        }
        tracing::trace!(run_id, status = %run.status, polls, "run still pending");

        let next_poll = Instant::now() + policy.poll_interval;
        let wake_at = match deadline {
            Some(deadline) => next_poll.min(deadline),
            None => next_poll,
        };
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PollError::Cancelled { polls }),
            _ = sleep_until(wake_at) => {}
        }

        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(timed_out(started, run));
        }
        last_run = Some(run);
    }
}

/// Resolves with the held run once its deadline passes; never resolves without one.
async fn expire(cutoff: Option<(Instant, Run)>) -> Run {
    match cutoff {
        Some((deadline, run)) => {
            sleep_until(deadline).await;
            run
        }
        None => std::future::pending().await,
    }
}

fn timed_out(started: Instant, last_run: Run) -> PollError {
    PollError::TimeoutExceeded {
        waited: started.elapsed(),
        last_run: Box::new(last_run),
    }
}
