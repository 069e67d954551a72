//! Convenience re-exports for common use.

pub use crate::client::runs::CreateRunRequest;
pub use crate::client::{AgentsClient, ThreadRuns};
pub use crate::config::{AgentsConfig, Credential};
pub use crate::error::{AgentsError, Result};
pub use crate::poll::{wait_until_terminal, PollError, PollPolicy, RetryingSource, RunStatusSource};
pub use crate::tools::{BingGroundingTool, FunctionDefinition, ToolDefinition};
pub use crate::types::{
    Agent, AgentThread, CreateAgentRequest, CreateMessageRequest, CreateThreadRequest,
    ListOptions, ListSortOrder, MessageRole, Run, RunStatus, RunStep, ThreadMessage, ToolOutput,
};
pub use crate::util::retry::RetryPolicy;
