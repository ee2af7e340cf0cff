//! Wrappers that keep a panicking hook from taking down the loop it observes.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use kchat::{ChatError, ChatRuntimeHooks, TurnOutcome, TurnPhase};
use kcommon::SessionId;
use kprovider::TokenUsage;
use ktooling::{ToolCallRequest, ToolError, ToolExecutionContext, ToolResult, ToolRuntimeHooks};

pub struct SafeToolHooks<H> {
    inner: H,
}

impl<H> SafeToolHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ToolRuntimeHooks for SafeToolHooks<H>
where
    H: ToolRuntimeHooks,
{
    fn on_execution_start(&self, request: &ToolCallRequest, context: &ToolExecutionContext) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_execution_start(request, context)
        }));
    }

    fn on_execution_success(
        &self,
        request: &ToolCallRequest,
        context: &ToolExecutionContext,
        result: &ToolResult,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_success(request, context, result, elapsed)
        }));
    }

    fn on_execution_failure(
        &self,
        request: &ToolCallRequest,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_failure(request, context, error, elapsed)
        }));
    }
}

pub struct SafeChatHooks<H> {
    inner: H,
}

impl<H> SafeChatHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ChatRuntimeHooks for SafeChatHooks<H>
where
    H: ChatRuntimeHooks,
{
    fn on_turn_start(&self, session_id: &SessionId) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_turn_start(session_id)));
    }

    fn on_completion(
        &self,
        phase: TurnPhase,
        session_id: &SessionId,
        step: u32,
        usage: TokenUsage,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_completion(phase, session_id, step, usage, elapsed)
        }));
    }

    fn on_tool_round(
        &self,
        phase: TurnPhase,
        session_id: &SessionId,
        step: u32,
        results: &[ToolResult],
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_tool_round(phase, session_id, step, results)
        }));
    }

    fn on_turn_success(&self, session_id: &SessionId, outcome: &TurnOutcome, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_turn_success(session_id, outcome, elapsed)
        }));
    }

    fn on_turn_failure(&self, session_id: &SessionId, error: &ChatError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_turn_failure(session_id, error, elapsed)
        }));
    }
}
