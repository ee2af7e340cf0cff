//! Small convenience constructors for common types.

use crate::{Message, SessionId, ToolExecutionContext};

pub fn system_message(content: impl Into<String>) -> Message {
    Message::system(content)
}

pub fn user_message(content: impl Into<String>) -> Message {
    Message::user(content)
}

pub fn assistant_message(content: impl Into<String>) -> Message {
    Message::assistant(content)
}

pub fn tool_context(session_id: impl Into<SessionId>) -> ToolExecutionContext {
    ToolExecutionContext::new(session_id)
}
