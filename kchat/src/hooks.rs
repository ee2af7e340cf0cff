//! Runtime hooks for turn lifecycle events.
//!
//! ```rust
//! use kchat::{ChatRuntimeHooks, NoopChatRuntimeHooks};
//!
//! fn accepts_hooks(_hooks: &dyn ChatRuntimeHooks) {}
//!
//! let hooks = NoopChatRuntimeHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use kcommon::SessionId;
use kprovider::TokenUsage;
use ktooling::ToolResult;

use crate::{ChatError, TurnOutcome, TurnPhase};

pub trait ChatRuntimeHooks: Send + Sync {
    fn on_turn_start(&self, _session_id: &SessionId) {}

    /// A completion round-trip finished; `step` counts from 1.
    fn on_completion(
        &self,
        _phase: TurnPhase,
        _session_id: &SessionId,
        _step: u32,
        _usage: TokenUsage,
        _elapsed: Duration,
    ) {
    }

    fn on_tool_round(
        &self,
        _phase: TurnPhase,
        _session_id: &SessionId,
        _step: u32,
        _results: &[ToolResult],
    ) {
    }

    fn on_turn_success(&self, _session_id: &SessionId, _outcome: &TurnOutcome, _elapsed: Duration) {}

    fn on_turn_failure(&self, _session_id: &SessionId, _error: &ChatError, _elapsed: Duration) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopChatRuntimeHooks;

impl ChatRuntimeHooks for NoopChatRuntimeHooks {}
