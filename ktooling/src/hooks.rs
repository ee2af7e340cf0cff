//! Runtime hooks for tool execution lifecycle events.
//!
//! ```rust
//! use ktooling::{NoopToolRuntimeHooks, ToolRuntimeHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let hooks = NoopToolRuntimeHooks;
//! assert_hooks_trait(&hooks);
//! ```

use std::time::Duration;

use crate::{ToolCallRequest, ToolError, ToolExecutionContext, ToolResult};

pub trait ToolRuntimeHooks: Send + Sync {
    fn on_execution_start(&self, _request: &ToolCallRequest, _context: &ToolExecutionContext) {}

    fn on_execution_success(
        &self,
        _request: &ToolCallRequest,
        _context: &ToolExecutionContext,
        _result: &ToolResult,
        _elapsed: Duration,
    ) {
    }

    /// Called for every failure the dispatcher turns into an error result.
    fn on_execution_failure(
        &self,
        _request: &ToolCallRequest,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopToolRuntimeHooks;

impl ToolRuntimeHooks for NoopToolRuntimeHooks {}
