//! Token usage reported on runs and run steps.

use serde::{Deserialize, Serialize};

/// Token usage for a run or a single run step.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RunUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl RunUsage {
    /// Merge another usage into this one (accumulate).
    pub fn merge(&mut self, other: &RunUsage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}
