//! Session wiring helpers.

use std::sync::Arc;

use kobserve::{SafeChatHooks, SafeToolHooks, TracingObservabilityHooks};

use crate::{ChatError, ChatPolicy, ChatSession, CompletionService, ToolError, ToolRegistry};

/// A registry holding the reference tools (`echo`, `add`, `search`, `get_current_time`).
pub fn default_registry() -> Result<Arc<ToolRegistry>, ToolError> {
    let mut registry = ToolRegistry::new();
    ktooling::builtin::register_all(&mut registry)?;
    Ok(Arc::new(registry))
}

pub fn chat_session(
    service: Arc<dyn CompletionService>,
    registry: Arc<ToolRegistry>,
    policy: ChatPolicy,
) -> Result<ChatSession, ChatError> {
    ChatSession::builder(service)
        .tool_registry(registry)
        .policy(policy)
        .build()
}

/// Like [`chat_session`], with tracing hooks on turns and tool dispatch.
pub fn traced_chat_session(
    service: Arc<dyn CompletionService>,
    registry: Arc<ToolRegistry>,
    policy: ChatPolicy,
) -> Result<ChatSession, ChatError> {
    ChatSession::builder(service)
        .tool_registry(registry)
        .tool_hooks(Arc::new(SafeToolHooks::new(TracingObservabilityHooks)))
        .hooks(Arc::new(SafeChatHooks::new(TracingObservabilityHooks)))
        .policy(policy)
        .build()
}
