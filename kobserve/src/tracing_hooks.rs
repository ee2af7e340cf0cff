//! Tracing-based observability hooks for tool dispatch and chat turns.
//!
//! ```rust
//! use kchat::ChatRuntimeHooks;
//! use kobserve::TracingObservabilityHooks;
//!
//! fn accepts_chat_hooks(_hooks: &dyn ChatRuntimeHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_chat_hooks(&hooks);
//! ```

use std::time::Duration;

use kchat::{ChatError, ChatRuntimeHooks, TurnOutcome, TurnPhase};
use kcommon::SessionId;
use kprovider::TokenUsage;
use ktooling::{ToolCallRequest, ToolError, ToolExecutionContext, ToolResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ToolRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, request: &ToolCallRequest, context: &ToolExecutionContext) {
        tracing::info!(
            phase = "tool",
            event = "execution_start",
            tool_name = request.name,
            params = request.raw_params.len(),
            session_id = %context.session_id
        );
    }

    fn on_execution_success(
        &self,
        request: &ToolCallRequest,
        context: &ToolExecutionContext,
        result: &ToolResult,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "tool",
            event = "execution_success",
            tool_name = request.name,
            session_id = %context.session_id,
            output_len = result.output.len(),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_execution_failure(
        &self,
        request: &ToolCallRequest,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        // Failures go back to the model as text; from the caller's side this is a warning.
        tracing::warn!(
            phase = "tool",
            event = "execution_failure",
            tool_name = request.name,
            session_id = %context.session_id,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }
}

impl ChatRuntimeHooks for TracingObservabilityHooks {
    fn on_turn_start(&self, session_id: &SessionId) {
        tracing::info!(phase = "chat", event = "turn_start", session_id = %session_id);
    }

    fn on_completion(
        &self,
        phase: TurnPhase,
        session_id: &SessionId,
        step: u32,
        usage: TokenUsage,
        elapsed: Duration,
    ) {
        tracing::debug!(
            phase = "chat",
            event = "completion",
            turn_phase = %phase,
            session_id = %session_id,
            step,
            total_tokens = usage.total_tokens,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_tool_round(
        &self,
        phase: TurnPhase,
        session_id: &SessionId,
        step: u32,
        results: &[ToolResult],
    ) {
        tracing::info!(
            phase = "chat",
            event = "tool_round",
            turn_phase = %phase,
            session_id = %session_id,
            step,
            calls = results.len(),
            errors = results.iter().filter(|result| result.is_error).count()
        );
    }

    fn on_turn_success(&self, session_id: &SessionId, outcome: &TurnOutcome, elapsed: Duration) {
        tracing::info!(
            phase = "chat",
            event = "turn_success",
            session_id = %session_id,
            termination = ?outcome.termination,
            steps = outcome.steps,
            total_tokens = outcome.usage.total_tokens,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_turn_failure(&self, session_id: &SessionId, error: &ChatError, elapsed: Duration) {
        tracing::error!(
            phase = "chat",
            event = "turn_failure",
            session_id = %session_id,
            error_kind = ?error.kind,
            retryable = error.retryable,
            step = error.step,
            elapsed_ms = elapsed.as_millis() as u64,
            error = %error
        );
    }
}
