//! Agent lifecycle: create, read, list, update, delete.

use futures::stream::BoxStream;

use crate::error::Result;
use crate::types::{Agent, CreateAgentRequest, DeletionStatus, ListOptions, ListPage, UpdateAgentRequest};

use super::pagination::paginate;
use super::{require_id, AgentsClient};

impl AgentsClient {
    pub async fn create_agent(&self, request: &CreateAgentRequest) -> Result<Agent> {
        self.post("assistants", request).await
    }

    pub async fn get_agent(&self, agent_id: &str) -> Result<Agent> {
        let agent_id = require_id("agent", agent_id)?;
        self.get(&format!("assistants/{agent_id}"), &[]).await
    }

    /// One page of agents.
    pub async fn list_agents(&self, options: &ListOptions) -> Result<ListPage<Agent>> {
        self.get("assistants", &options.to_query()).await
    }

    /// Every agent in the project, following page cursors.
    pub fn agents(&self, options: ListOptions) -> BoxStream<'_, Result<Agent>> {
        paginate(options, move |page| async move { self.list_agents(&page).await })
    }

    pub async fn update_agent(&self, agent_id: &str, request: &UpdateAgentRequest) -> Result<Agent> {
        let agent_id = require_id("agent", agent_id)?;
        self.post(&format!("assistants/{agent_id}"), request).await
    }

    pub async fn delete_agent(&self, agent_id: &str) -> Result<DeletionStatus> {
        let agent_id = require_id("agent", agent_id)?;
        self.delete(&format!("assistants/{agent_id}")).await
    }
}
