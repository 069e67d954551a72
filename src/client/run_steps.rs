//! Steps recorded for a run.

use futures::stream::BoxStream;

use crate::error::Result;
use crate::types::{ListOptions, ListPage, RunStep};

use super::pagination::paginate;
use super::{require_id, AgentsClient};

impl AgentsClient {
    /// One page of steps of a run.
    pub async fn list_run_steps(
        &self,
        thread_id: &str,
        run_id: &str,
        options: &ListOptions,
    ) -> Result<ListPage<RunStep>> {
        let thread_id = require_id("thread", thread_id)?;
        let run_id = require_id("run", run_id)?;
        self.get(
            &format!("threads/{thread_id}/runs/{run_id}/steps"),
            &options.to_query(),
        )
        .await
    }

    pub async fn get_run_step(&self, thread_id: &str, run_id: &str, step_id: &str) -> Result<RunStep> {
        let thread_id = require_id("thread", thread_id)?;
        let run_id = require_id("run", run_id)?;
        let step_id = require_id("run step", step_id)?;
        self.get(&format!("threads/{thread_id}/runs/{run_id}/steps/{step_id}"), &[])
            .await
    }

    /// Every step of a run, following page cursors.
    pub fn run_steps(&self, thread_id: &str, run_id: &str, options: ListOptions) -> BoxStream<'_, Result<RunStep>> {
        let thread_id = thread_id.to_string();
        let run_id = run_id.to_string();
        paginate(options, move |page| {
            let thread_id = thread_id.clone();
            let run_id = run_id.clone();
            async move { self.list_run_steps(&thread_id, &run_id, &page).await }
        })
    }
}
