//! Shared test helpers: a scripted run status source.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use foundry_agents::error::{AgentsError, Result};
use foundry_agents::poll::RunStatusSource;
use foundry_agents::types::{Run, RunStatus};

/// One scripted answer to `fetch_run`.
#[derive(Debug, Clone)]
pub enum Step {
    Status(RunStatus),
    /// A run in status `failed` with a populated `last_error`.
    FailedRun { code: String, message: String },
    /// The service answered with this HTTP status.
    TransportError(u16),
    /// The fetch hangs for this long before reporting the status.
    Stalled(Duration, RunStatus),
}

impl Step {
    pub fn status(raw: &str) -> Self {
        Self::Status(RunStatus::from(raw))
    }

    pub fn failed_run(code: &str, message: &str) -> Self {
        Self::FailedRun {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn stalled(delay: Duration, raw: &str) -> Self {
        Self::Stalled(delay, RunStatus::from(raw))
    }

    async fn answer(&self, run_id: &str) -> Result<Run> {
        match self {
            Self::Status(status) => Ok(Run::new(run_id, status.clone())),
            Self::Stalled(delay, status) => {
                tokio::time::sleep(*delay).await;
                Ok(Run::new(run_id, status.clone()))
            }
            Self::FailedRun { code, message } => {
                Ok(Run::new(run_id, RunStatus::Failed).with_last_error(code, message))
            }
            Self::TransportError(status) => {
                Err(AgentsError::api(*status, format!("scripted {status}")))
            }
        }
    }
}

/// Answers each run id from its own script, repeating the last step forever.
#[derive(Default)]
pub struct ScriptedSource {
    scripts: Mutex<HashMap<String, VecDeque<Step>>>,
    fetches: AtomicUsize,
    fetches_by_id: Mutex<HashMap<String, usize>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(self, run_id: &str, steps: Vec<Step>) -> Self {
        assert!(!steps.is_empty(), "script for {run_id} must not be empty");
        self.scripts
            .lock()
            .unwrap()
            .insert(run_id.to_string(), steps.into());
        self
    }

    pub fn with_statuses(self, run_id: &str, statuses: &[&str]) -> Self {
        let steps = statuses.iter().map(|raw| Step::status(raw)).collect();
        self.with_script(run_id, steps)
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn fetches_for(&self, run_id: &str) -> usize {
        self.fetches_by_id
            .lock()
            .unwrap()
            .get(run_id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl RunStatusSource for ScriptedSource {
    async fn fetch_run(&self, run_id: &str) -> Result<Run> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        *self
            .fetches_by_id
            .lock()
            .unwrap()
            .entry(run_id.to_string())
            .or_insert(0) += 1;

        let step = {
            let mut scripts = self.scripts.lock().unwrap();
            let Some(queue) = scripts.get_mut(run_id) else {
                return Err(AgentsError::NotFound(format!("no script for {run_id}")));
            };
            if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap()
            }
        };
        step.answer(run_id).await
    }
}
