//! Tool definitions an agent can be created with.

pub mod bing;
pub mod types;

pub use bing::{BingGroundingParameters, BingGroundingTool, BingSearchConfiguration};
pub use types::{FunctionDefinition, ParameterBuilder, ToolDefinition};
