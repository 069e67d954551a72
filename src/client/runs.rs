//! Runs on a thread, and waiting for them to finish.

use std::collections::HashMap;

use async_trait::async_trait;
use bon::Builder;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::poll::{wait_until_terminal, PollError, PollPolicy, RunStatusSource};
use crate::tools::ToolDefinition;
use crate::types::{CreateMessageRequest, ListOptions, ListPage, Run, ToolOutput};

use super::{require_id, AgentsClient};

/// Body of `POST threads/{thread_id}/runs`.
///
/// # Example
/// ```
/// use foundry_agents::client::runs::CreateRunRequest;
///
/// let request = CreateRunRequest::builder()
///     .agent_id("asst_123")
///     .additional_instructions("Answer in one sentence.")
///     .build();
/// assert_eq!(request.agent_id, "asst_123");
/// ```
#[derive(Debug, Clone, Serialize, Builder)]
pub struct CreateRunRequest {
    #[builder(into)]
    #[serde(rename = "assistant_id")]
    pub agent_id: String,
    /// Overrides the agent's model deployment for this run.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Replaces the agent's instructions for this run.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Appended to the agent's instructions for this run.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_instructions: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_messages: Vec<CreateMessageRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_prompt_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    #[builder(default)]
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl CreateRunRequest {
    /// Run `agent_id` with its stored configuration.
    pub fn for_agent(agent_id: impl Into<String>) -> Self {
        Self::builder().agent_id(agent_id).build()
    }
}

#[derive(Debug, Serialize)]
struct SubmitToolOutputsBody<'a> {
    tool_outputs: &'a [ToolOutput],
}

impl AgentsClient {
    pub async fn create_run(&self, thread_id: &str, request: &CreateRunRequest) -> Result<Run> {
        let thread_id = require_id("thread", thread_id)?;
        require_id("agent", &request.agent_id)?;
        self.post(&format!("threads/{thread_id}/runs"), request).await
    }

    pub async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        let thread_id = require_id("thread", thread_id)?;
        let run_id = require_id("run", run_id)?;
        self.get(&format!("threads/{thread_id}/runs/{run_id}"), &[])
            .await
    }

    pub async fn list_runs(&self, thread_id: &str, options: &ListOptions) -> Result<ListPage<Run>> {
        let thread_id = require_id("thread", thread_id)?;
        self.get(&format!("threads/{thread_id}/runs"), &options.to_query())
            .await
    }

    /// Ask the service to cancel a run. The returned run is usually `cancelling`.
    pub async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        let thread_id = require_id("thread", thread_id)?;
        let run_id = require_id("run", run_id)?;
        self.post(
            &format!("threads/{thread_id}/runs/{run_id}/cancel"),
            &serde_json::json!({}),
        )
        .await
    }

    /// Answer the function calls of a run in `requires_action`.
    pub async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<Run> {
        let thread_id = require_id("thread", thread_id)?;
        let run_id = require_id("run", run_id)?;
        self.post(
            &format!("threads/{thread_id}/runs/{run_id}/submit_tool_outputs"),
            &SubmitToolOutputsBody {
                tool_outputs: outputs,
            },
        )
        .await
    }

    /// Status source for the runs of one thread.
    pub fn thread_runs(&self, thread_id: impl Into<String>) -> ThreadRuns {
        ThreadRuns {
            client: self.clone(),
            thread_id: thread_id.into(),
        }
    }

    /// Poll an existing run until `policy` says it is done.
    pub async fn wait_for_run(
        &self,
        thread_id: &str,
        run_id: &str,
        policy: &PollPolicy,
        cancel: &CancellationToken,
    ) -> std::result::Result<Run, PollError> {
        wait_until_terminal(&self.thread_runs(thread_id), run_id, policy, cancel).await
    }

    /// Start a run and poll it until `policy` says it is done.
    ///
    /// A run that ends `failed` is returned, not raised; inspect
    /// [`Run::last_error`]. Failing to create the run is a
    /// [`PollError::Transport`].
    pub async fn create_and_process(
        &self,
        thread_id: &str,
        request: &CreateRunRequest,
        policy: &PollPolicy,
        cancel: &CancellationToken,
    ) -> std::result::Result<Run, PollError> {
        let run = self
            .create_run(thread_id, request)
            .await
            .map_err(PollError::Transport)?;
        tracing::debug!(run_id = %run.id, status = %run.status, "run created");
        if !policy.keeps_polling(&run.status) {
            return Ok(run);
        }
        self.wait_for_run(thread_id, &run.id, policy, cancel).await
    }
}

/// Reads runs of one thread; the service addresses runs per thread.
#[derive(Debug, Clone)]
pub struct ThreadRuns {
    client: AgentsClient,
    thread_id: String,
}

impl ThreadRuns {
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }
}

#[async_trait]
impl RunStatusSource for ThreadRuns {
    async fn fetch_run(&self, run_id: &str) -> Result<Run> {
        self.client.get_run(&self.thread_id, run_id).await
    }
}
