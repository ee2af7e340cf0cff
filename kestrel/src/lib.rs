//! Unified facade over the kestrel workspace crates.
//!
//! Applications usually depend on this crate alone. It re-exports the member crates
//! and adds wiring helpers and macros for the common setup paths.
//!
//! ```rust
//! use kestrel::prelude::*;
//!
//! let registry = default_registry().expect("reference tools register");
//! let spec = ktool_spec!("shout", "Upper-cases text", text: String);
//!
//! assert!(registry.contains("add"));
//! assert_eq!(spec.example_directive(), r#"{"name":"shout","params":{"text":"<text>"}}"#);
//! ```

mod macros;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use kchat;
pub use kcommon;
pub use kobserve;
pub use kprovider;
pub use ktooling;

pub use kchat::{
    ChatError, ChatErrorKind, ChatPolicy, ChatRuntimeHooks, ChatSession, ChatSessionBuilder,
    Conversation, NoopChatRuntimeHooks, ParsedOutput, TurnOutcome, TurnPhase, TurnTermination,
    parse_model_output,
};
pub use kcommon::{BoxFuture, GenerationOptions, MetadataMap, SessionId};
pub use kobserve::{
    MetricsObservabilityHooks, SafeChatHooks, SafeToolHooks, TracingObservabilityHooks,
};
pub use kprovider::{
    CompletionRequest, CompletionResponse, CompletionService, Message, ProviderError,
    ProviderErrorKind, ProviderFuture, Role, TokenUsage,
};
pub use ktooling::{
    FunctionTool, NoopToolRuntimeHooks, ParamType, Tool, ToolArgs, ToolCallRequest,
    ToolDispatcher, ToolError, ToolErrorKind, ToolExecutionContext, ToolRegistry, ToolResult,
    ToolRuntime, ToolRuntimeHooks, ToolSpec, required_f64, required_string,
};

pub use runtime::{chat_session, default_registry, traced_chat_session};
pub use util::{assistant_message, system_message, tool_context, user_message};

#[cfg(test)]
mod tests {
    use crate::{ParamType, Role};

    #[test]
    fn kmsg_macro_creates_expected_message() {
        let message = crate::kmsg!(user => "hello");
        assert_eq!(message.role, Role::User);
        assert_eq!(message.content, "hello");
    }

    #[test]
    fn kmessages_macro_builds_message_vector() {
        let messages = crate::kmessages![
            system => "You are concise.",
            user => "Summarize the repo",
        ];

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn ktool_spec_macro_keeps_parameter_order() {
        let spec = crate::ktool_spec!("add", "Adds two numbers", a: Float, b: Float);
        let names: Vec<&str> = spec.params.iter().map(|decl| decl.name.as_str()).collect();

        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(spec.params.get("a"), Some(ParamType::Float));
        assert!(crate::ktool_spec!("get_current_time", "Reads the clock").params.is_empty());
    }
}
