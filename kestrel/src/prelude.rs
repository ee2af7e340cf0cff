//! Common imports for most kestrel applications.

pub use crate::{
    assistant_message, chat_session, default_registry, system_message, tool_context,
    traced_chat_session, user_message,
};
pub use crate::{kmessages, kmsg, ktool_spec};
pub use crate::{
    ChatError, ChatErrorKind, ChatPolicy, ChatSession, CompletionRequest, CompletionResponse,
    CompletionService, Message, ParamType, ProviderError, ProviderFuture, Role, SessionId, Tool,
    ToolError, ToolRegistry, ToolResult, ToolSpec, TurnOutcome, TurnTermination,
};
