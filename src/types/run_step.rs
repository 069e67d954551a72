//! Run steps: the individual actions a run took.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::run::RunError;
use super::usage::RunUsage;

/// Status of a single run step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunStepStatus {
    InProgress,
    Cancelled,
    Failed,
    Completed,
    Expired,
    /// A step status this crate does not model.
    #[serde(other)]
    Unknown,
}

/// A step of a run: either a message it wrote or tools it called.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunStep {
    pub id: String,
    #[serde(default)]
    pub run_id: String,
    #[serde(default)]
    pub thread_id: String,
    pub status: RunStepStatus,
    pub step_details: StepDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<RunError>,
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
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<RunUsage>,
}

impl RunStep {
    /// Tool calls made in this step; empty for message-creation steps.
    pub fn tool_calls(&self) -> &[StepToolCall] {
        match &self.step_details {
            StepDetails::ToolCalls { tool_calls } => tool_calls,
            StepDetails::MessageCreation { .. } => &[],
        }
    }
}

/// What a step did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepDetails {
    MessageCreation { message_creation: MessageCreation },
    ToolCalls {
        #[serde(default)]
        tool_calls: Vec<StepToolCall>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageCreation {
    pub message_id: String,
}

/// A tool invocation recorded in a run step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepToolCall {
    BingGrounding {
        id: String,
        #[serde(default)]
        bing_grounding: BingGroundingCall,
    },
    Function {
        id: String,
        function: FunctionCallRecord,
    },
    CodeInterpreter {
        id: String,
        #[serde(default)]
        code_interpreter: serde_json::Value,
    },
    #[serde(other)]
    Other,
}

impl StepToolCall {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::BingGrounding { id, .. }
            | Self::Function { id, .. }
            | Self::CodeInterpreter { id, .. } => Some(id),
            Self::Other => None,
        }
    }

    /// Wire name of the tool call type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BingGrounding { .. } => "bing_grounding",
            Self::Function { .. } => "function",
            Self::CodeInterpreter { .. } => "code_interpreter",
            Self::Other => "other",
        }
    }
}

/// Details of a Bing search issued by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BingGroundingCall {
    /// Search URL the service built from the user's question.
    #[serde(default, rename = "requesturl", skip_serializing_if = "Option::is_none")]
    pub request_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_metadata: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCallRecord {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
    #[serde(default)]
    pub output: Option<String>,
}
