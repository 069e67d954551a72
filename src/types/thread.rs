//! Conversation threads.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::CreateMessageRequest;

/// A conversation thread that messages and runs are attached to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentThread {
    pub id: String,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Body of `POST threads`.
#[derive(Debug, Clone, Serialize, Default)]
pub struct CreateThreadRequest {
    /// Messages to seed the thread with.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<CreateMessageRequest>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl CreateThreadRequest {
    pub fn with_message(mut self, message: CreateMessageRequest) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
