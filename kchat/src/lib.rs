//! Tool-augmented conversation loop over a completion service.
//!
//! A [`ChatSession`] owns one [`Conversation`] and drives each user turn through a
//! bounded probe/answer loop, dispatching any tool directives the model emits.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use kchat::prelude::*;
//! use kprovider::{CompletionRequest, CompletionResponse, CompletionService};
//! use kprovider::{ProviderError, ProviderFuture};
//!
//! struct Polite;
//!
//! impl CompletionService for Polite {
//!     fn name(&self) -> &str {
//!         "polite"
//!     }
//!
//!     fn complete<'a>(
//!         &'a self,
//!         _request: CompletionRequest,
//!     ) -> ProviderFuture<'a, Result<CompletionResponse, ProviderError>> {
//!         Box::pin(async { Ok(CompletionResponse::assistant("Hello there.")) })
//!     }
//! }
//!
//! let session = ChatSession::builder(Arc::new(Polite))
//!     .session_id("demo")
//!     .policy(ChatPolicy::compact())
//!     .build()
//!     .expect("valid policy");
//! assert!(session.conversation().is_empty());
//! ```

mod conversation;
mod error;
mod hooks;
mod parser;
mod policy;
mod session;
mod synthesis;
mod types;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatPolicy, ChatRuntimeHooks, ChatSession, ChatSessionBuilder,
        Conversation, ParsedOutput, TurnOutcome, TurnPhase, TurnTermination, parse_model_output,
    };
    pub use kcommon::SessionId;
    pub use kprovider::{Message, Role};
    pub use ktooling::{
        ParamType, Tool, ToolCallRequest, ToolError, ToolErrorKind, ToolRegistry, ToolResult,
        ToolRuntime, ToolSpec,
    };
}

pub use conversation::Conversation;
pub use error::{ChatError, ChatErrorKind};
pub use hooks::{ChatRuntimeHooks, NoopChatRuntimeHooks};
pub use parser::{ParsedOutput, looks_like_directive, parse_model_output};
pub use policy::{ChatPolicy, DEFAULT_MAX_STEPS, DEFAULT_PROBE_PREAMBLE, DEFAULT_RESULTS_PREAMBLE};
pub use session::{ChatSession, ChatSessionBuilder};
pub use synthesis::{probe_instructions, probe_prompt, results_message};
pub use types::{TurnOutcome, TurnPhase, TurnTermination};
