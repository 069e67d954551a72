//! Web-search grounding through a Bing connection.

use serde::{Deserialize, Serialize};

use super::types::ToolDefinition;

/// Parameters of a `bing_grounding` tool definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BingGroundingParameters {
    #[serde(default)]
    pub search_configurations: Vec<BingSearchConfiguration>,
}

/// One search configuration bound to a Bing connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BingSearchConfiguration {
    pub connection_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freshness: Option<String>,
}

/// Grounds agent answers in Bing web search results.
///
/// # Example
/// ```
/// use foundry_agents::tools::BingGroundingTool;
///
/// let bing = BingGroundingTool::new("/subscriptions/.../connections/bing")
///     .with_freshness("day")
///     .with_count(5)
///     .with_set_lang("en")
///     .with_market("en-US");
/// assert_eq!(bing.definitions().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BingGroundingTool {
    config: BingSearchConfiguration,
}

impl BingGroundingTool {
    /// `connection_id` is the full resource id of the project's Bing connection.
    pub fn new(connection_id: impl Into<String>) -> Self {
        Self {
            config: BingSearchConfiguration {
                connection_id: connection_id.into(),
                ..Default::default()
            },
        }
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.config.market = Some(market.into());
        self
    }

    pub fn with_set_lang(mut self, set_lang: impl Into<String>) -> Self {
        self.config.set_lang = Some(set_lang.into());
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.config.count = Some(count);
        self
    }

    /// `day`, `week`, `month`, or a date range such as `2025-01-01..2025-02-01`.
    pub fn with_freshness(mut self, freshness: impl Into<String>) -> Self {
        self.config.freshness = Some(freshness.into());
        self
    }

    pub fn connection_id(&self) -> &str {
        &self.config.connection_id
    }

    /// Tool definitions to pass when creating an agent.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![ToolDefinition::BingGrounding {
            bing_grounding: BingGroundingParameters {
                search_configurations: vec![self.config.clone()],
            },
        }]
    }
}
