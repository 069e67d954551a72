//! Cursor-paginated list responses and their query options.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Sort order by creation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ListSortOrder {
    Asc,
    #[default]
    Desc,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListPage<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub first_id: Option<String>,
    #[serde(default)]
    pub last_id: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> ListPage<T> {
    /// Cursor for the following page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_more {
            self.last_id.as_deref()
        } else {
            None
        }
    }
}

/// Query options shared by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Page size, 1 to 100 (service default 20).
    pub limit: Option<u32>,
    pub order: Option<ListSortOrder>,
    pub after: Option<String>,
    pub before: Option<String>,
}

impl ListOptions {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_order(mut self, order: ListSortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    pub fn with_before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    /// Query pairs for the request URL.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(order) = self.order {
            query.push(("order", order.to_string()));
        }
        if let Some(ref after) = self.after {
            query.push(("after", after.clone()));
        }
        if let Some(ref before) = self.before {
            query.push(("before", before.clone()));
        }
        query
    }
}
