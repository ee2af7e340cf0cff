//! Metrics-based observability hooks for tool dispatch and chat turns.
//!
//! ```rust
//! use kobserve::MetricsObservabilityHooks;
//! use ktooling::ToolRuntimeHooks;
//!
//! fn accepts_tool_hooks(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_tool_hooks(&hooks);
//! ```

use std::time::Duration;

use kchat::{ChatError, ChatRuntimeHooks, TurnOutcome, TurnPhase};
use kcommon::SessionId;
use kprovider::TokenUsage;
use ktooling::{ToolCallRequest, ToolError, ToolExecutionContext, ToolResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, request: &ToolCallRequest, _context: &ToolExecutionContext) {
        metrics::counter!(
            "kestrel_tool_execution_start_total",
            "tool_name" => request.name.clone()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        request: &ToolCallRequest,
        _context: &ToolExecutionContext,
        _result: &ToolResult,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "kestrel_tool_execution_success_total",
            "tool_name" => request.name.clone()
        )
        .increment(1);
        metrics::histogram!(
            "kestrel_tool_execution_duration_seconds",
            "tool_name" => request.name.clone(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(
        &self,
        request: &ToolCallRequest,
        _context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "kestrel_tool_execution_failure_total",
            "tool_name" => request.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "kestrel_tool_execution_duration_seconds",
            "tool_name" => request.name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl ChatRuntimeHooks for MetricsObservabilityHooks {
    fn on_turn_start(&self, _session_id: &SessionId) {
        metrics::counter!("kestrel_chat_turn_start_total").increment(1);
    }

    fn on_completion(
        &self,
        phase: TurnPhase,
        _session_id: &SessionId,
        _step: u32,
        usage: TokenUsage,
        elapsed: Duration,
    ) {
        metrics::counter!("kestrel_chat_tokens_total", "phase" => phase.to_string())
            .increment(u64::from(usage.total_tokens));
        metrics::histogram!(
            "kestrel_chat_completion_duration_seconds",
            "phase" => phase.to_string()
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_tool_round(
        &self,
        phase: TurnPhase,
        _session_id: &SessionId,
        _step: u32,
        results: &[ToolResult],
    ) {
        metrics::histogram!("kestrel_chat_tool_calls_per_round", "phase" => phase.to_string())
            .record(results.len() as f64);
    }

    fn on_turn_success(&self, _session_id: &SessionId, outcome: &TurnOutcome, elapsed: Duration) {
        metrics::counter!(
            "kestrel_chat_turn_success_total",
            "termination" => format!("{:?}", outcome.termination)
        )
        .increment(1);
        metrics::histogram!("kestrel_chat_steps_per_turn").record(f64::from(outcome.steps));
        metrics::histogram!(
            "kestrel_chat_turn_duration_seconds",
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_turn_failure(&self, _session_id: &SessionId, error: &ChatError, elapsed: Duration) {
        metrics::counter!(
            "kestrel_chat_turn_failure_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "kestrel_chat_turn_duration_seconds",
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}
