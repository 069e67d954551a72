//! Runs: one asynchronous unit of agent work against a thread.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::usage::RunUsage;

/// Status of a run as reported by the service.
///
/// The known values form a closed set. Anything else the service sends is kept
/// verbatim in [`RunStatus::Unknown`] so callers can still inspect it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Completed,
    Failed,
    Cancelled,
    Expired,
    Unknown(String),
}

impl RunStatus {
    /// Wire representation of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::RequiresAction => "requires_action",
            Self::Cancelling => "cancelling",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
            Self::Unknown(raw) => raw,
        }
    }

    /// Returns true if the service guarantees no further transitions.
    ///
    /// Unrecognized statuses are never terminal here; a poll policy can
    /// declare specific raw values terminal.
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Completed | Self::Failed | Self::Cancelled | Self::Expired => true,
            Self::Queued
            | Self::InProgress
            | Self::RequiresAction
            | Self::Cancelling
            | Self::Unknown(_) => false,
        }
    }

    /// Returns true if the service is waiting on caller-supplied input.
    pub fn needs_caller_action(&self) -> bool {
        matches!(self, Self::RequiresAction)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl From<&str> for RunStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "queued" => Self::Queued,
            "in_progress" => Self::InProgress,
            "requires_action" => Self::RequiresAction,
            "cancelling" => Self::Cancelling,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            "expired" => Self::Expired,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for RunStatus {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for RunStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic payload attached to a failed run or run step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Action the service needs from the caller before the run can continue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequiredAction {
    SubmitToolOutputs {
        submit_tool_outputs: SubmitToolOutputsAction,
    },
}

impl RequiredAction {
    /// Function calls the caller must answer via `submit_tool_outputs`.
    pub fn tool_calls(&self) -> &[RequiredToolCall] {
        match self {
            Self::SubmitToolOutputs {
                submit_tool_outputs,
            } => &submit_tool_outputs.tool_calls,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitToolOutputsAction {
    #[serde(default)]
    pub tool_calls: Vec<RequiredToolCall>,
}

/// A function call the agent wants the caller to execute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequiredToolCall {
    pub id: String,
    pub function: RequiredFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequiredFunctionCall {
    pub name: String,
    /// JSON-encoded arguments, as sent by the service.
    #[serde(default)]
    pub arguments: String,
}

impl RequiredFunctionCall {
    /// Parse the arguments, falling back to the raw string when they are not JSON.
    pub fn parsed_arguments(&self) -> serde_json::Value {
        serde_json::from_str(&self.arguments)
            .unwrap_or_else(|_| serde_json::Value::String(self.arguments.clone()))
    }
}

/// Output for one required tool call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub output: String,
}

impl ToolOutput {
    pub fn new(tool_call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            output: output.into(),
        }
    }
}

/// One asynchronous unit of agent work triggered against a thread.
///
/// This is a read-through view: each poll replaces the previous value with
/// whatever the service reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Run {
    pub id: String,
    #[serde(default)]
    pub thread_id: String,
    #[serde(default, rename = "assistant_id")]
    pub agent_id: String,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<RunError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_action: Option<RequiredAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub failed_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<RunUsage>,
}

impl Run {
    /// Minimal run with only an id and a status.
    pub fn new(id: impl Into<String>, status: RunStatus) -> Self {
        Self {
            id: id.into(),
            thread_id: String::new(),
            agent_id: String::new(),
            status,
            last_error: None,
            required_action: None,
            model: None,
            instructions: None,
            created_at: None,
            started_at: None,
            completed_at: None,
            failed_at: None,
            cancelled_at: None,
            expires_at: None,
            usage: None,
        }
    }

    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = thread_id.into();
        self
    }

    pub fn with_last_error(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.last_error = Some(RunError {
            code: code.into(),
            message: message.into(),
        });
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Tool calls the service is waiting on, if the run requires action.
    pub fn required_tool_calls(&self) -> &[RequiredToolCall] {
        self.required_action
            .as_ref()
            .map(RequiredAction::tool_calls)
            .unwrap_or(&[])
    }
}
