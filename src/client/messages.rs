//! Messages on a thread.

use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};

use crate::error::Result;
use crate::types::{
    CreateMessageRequest, ListOptions, ListPage, ListSortOrder, MessageRole, ThreadMessage,
};

use super::pagination::paginate;
use super::{require_id, AgentsClient};

impl AgentsClient {
    pub async fn create_message(
        &self,
        thread_id: &str,
        request: &CreateMessageRequest,
    ) -> Result<ThreadMessage> {
        let thread_id = require_id("thread", thread_id)?;
        self.post(&format!("threads/{thread_id}/messages"), request)
            .await
    }

    pub async fn get_message(&self, thread_id: &str, message_id: &str) -> Result<ThreadMessage> {
        let thread_id = require_id("thread", thread_id)?;
        let message_id = require_id("message", message_id)?;
        self.get(&format!("threads/{thread_id}/messages/{message_id}"), &[])
            .await
    }

    /// One page of messages.
    pub async fn list_messages(
        &self,
        thread_id: &str,
        options: &ListOptions,
    ) -> Result<ListPage<ThreadMessage>> {
        let thread_id = require_id("thread", thread_id)?;
        self.get(&format!("threads/{thread_id}/messages"), &options.to_query())
            .await
    }

    /// Every message on the thread in the given order, following page cursors.
    pub fn messages(
        &self,
        thread_id: &str,
        order: ListSortOrder,
    ) -> BoxStream<'_, Result<ThreadMessage>> {
        let thread_id = thread_id.to_string();
        let first = ListOptions::default().with_order(order).with_limit(100);
        paginate(first, move |page| {
            let thread_id = thread_id.clone();
            async move { self.list_messages(&thread_id, &page).await }
        })
    }

    /// Collect every message on the thread.
    pub async fn all_messages(
        &self,
        thread_id: &str,
        order: ListSortOrder,
    ) -> Result<Vec<ThreadMessage>> {
        self.messages(thread_id, order).try_collect().await
    }

    /// Newest message written by `role`, if any.
    pub async fn get_last_message_by_role(
        &self,
        thread_id: &str,
        role: MessageRole,
    ) -> Result<Option<ThreadMessage>> {
        let mut messages = self.messages(thread_id, ListSortOrder::Desc);
        while let Some(message) = messages.next().await {
            let message = message?;
            if message.role == role {
                return Ok(Some(message));
            }
        }
        Ok(None)
    }
}
