//! Tool definitions attached to agents and runs.

use serde::{Deserialize, Serialize};

use super::bing::BingGroundingParameters;

/// A tool the service may invoke on the agent's behalf.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolDefinition {
    CodeInterpreter,
    FileSearch,
    Function {
        function: FunctionDefinition,
    },
    BingGrounding {
        bing_grounding: BingGroundingParameters,
    },
    /// A tool type this crate does not model.
    #[serde(other)]
    Unsupported,
}

impl ToolDefinition {
    /// Wire name of the tool type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CodeInterpreter => "code_interpreter",
            Self::FileSearch => "file_search",
            Self::Function { .. } => "function",
            Self::BingGrounding { .. } => "bing_grounding",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Caller-executed function exposed to the agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema object describing the arguments.
    pub parameters: serde_json::Value,
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            parameters,
        }
    }

    /// Builder: create an object schema with properties.
    pub fn parameters() -> ParameterBuilder {
        ParameterBuilder {
            properties: serde_json::Map::new(),
            required: Vec::new(),
        }
    }

    pub fn into_tool(self) -> ToolDefinition {
        ToolDefinition::Function { function: self }
    }
}

/// Builder for function parameter schemas.
pub struct ParameterBuilder {
    properties: serde_json::Map<String, serde_json::Value>,
    required: Vec<String>,
}

impl ParameterBuilder {
    fn property(mut self, name: impl Into<String>, schema: serde_json::Value, required: bool) -> Self {
        let name = name.into();
        self.properties.insert(name.clone(), schema);
        if required {
            self.required.push(name);
        }
        self
    }

    pub fn string(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        let schema = serde_json::json!({ "type": "string", "description": description.into() });
        self.property(name, schema, required)
    }

    pub fn number(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        let schema = serde_json::json!({ "type": "number", "description": description.into() });
        self.property(name, schema, required)
    }

    pub fn boolean(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        let schema = serde_json::json!({ "type": "boolean", "description": description.into() });
        self.property(name, schema, required)
    }

    /// Add an enum (string) property.
    pub fn string_enum(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        values: &[&str],
        required: bool,
    ) -> Self {
        let schema = serde_json::json!({
            "type": "string",
            "description": description.into(),
            "enum": values,
        });
        self.property(name, schema, required)
    }

    pub fn build(self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": self.properties,
            "required": self.required,
        })
    }
}
