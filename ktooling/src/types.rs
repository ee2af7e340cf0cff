//! Tool call requests, results, and execution context.

use std::fmt::{Display, Formatter};

use kcommon::{MetadataMap, SessionId};
use serde_json::Value;

use crate::ToolArgs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionContext {
    pub session_id: SessionId,
    pub metadata: MetadataMap,
}

impl ToolExecutionContext {
    pub fn new(session_id: impl Into<SessionId>) -> Self {
        Self {
            session_id: session_id.into(),
            metadata: MetadataMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// One invocation requested by the model, with arguments exactly as it wrote them.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRequest {
    pub name: String,
    pub raw_params: ToolArgs,
}

impl ToolCallRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_params: ToolArgs::new(),
        }
    }

    pub fn with_params(mut self, raw_params: ToolArgs) -> Self {
        self.raw_params = raw_params;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.raw_params.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub name: String,
    pub output: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn ok(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output: output.into(),
            is_error: false,
        }
    }

    pub fn error(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output: output.into(),
            is_error: true,
        }
    }

    /// The model-facing line: `Tool <name>, response: <output>`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for ToolResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tool {}, response: {}", self.name, self.output)
    }
}
