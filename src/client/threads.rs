//! Thread lifecycle.

use crate::error::Result;
use crate::types::{AgentThread, CreateThreadRequest, DeletionStatus};

use super::{require_id, AgentsClient};

impl AgentsClient {
    pub async fn create_thread(&self, request: &CreateThreadRequest) -> Result<AgentThread> {
        self.post("threads", request).await
    }

    pub async fn get_thread(&self, thread_id: &str) -> Result<AgentThread> {
        let thread_id = require_id("thread", thread_id)?;
        self.get(&format!("threads/{thread_id}"), &[]).await
    }

    pub async fn delete_thread(&self, thread_id: &str) -> Result<DeletionStatus> {
        let thread_id = require_id("thread", thread_id)?;
        self.delete(&format!("threads/{thread_id}")).await
    }
}
