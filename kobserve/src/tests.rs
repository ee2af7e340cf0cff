use std::sync::{Arc, Mutex};
use std::time::Duration;

use kchat::{
    ChatError, ChatRuntimeHooks, ChatSession, TurnOutcome, TurnPhase, TurnTermination,
};
use kcommon::SessionId;
use kprovider::{
    CompletionRequest, CompletionResponse, CompletionService, Message, ProviderError,
    ProviderFuture, TokenUsage,
};
use ktooling::{ToolCallRequest, ToolError, ToolExecutionContext, ToolResult, ToolRuntimeHooks};

use crate::{MetricsObservabilityHooks, SafeChatHooks, SafeToolHooks, TracingObservabilityHooks};

fn sample_request() -> ToolCallRequest {
    ToolCallRequest::new("echo").with_param("text", "hi")
}

fn sample_tool_context() -> ToolExecutionContext {
    ToolExecutionContext::new("session-1").with_metadata("phase", "durable")
}

fn sample_outcome() -> TurnOutcome {
    TurnOutcome {
        reply: Message::assistant("done"),
        termination: TurnTermination::Answered,
        steps: 2,
        tool_results: vec![ToolResult::ok("echo", "Echo: hi")],
        usage: TokenUsage {
            input_tokens: 8,
            output_tokens: 4,
            total_tokens: 12,
        },
    }
}

fn exercise_tool_hooks(hooks: &dyn ToolRuntimeHooks) {
    hooks.on_execution_start(&sample_request(), &sample_tool_context());
    hooks.on_execution_success(
        &sample_request(),
        &sample_tool_context(),
        &ToolResult::ok("echo", "Echo: hi"),
        Duration::from_millis(20),
    );
    hooks.on_execution_failure(
        &sample_request(),
        &sample_tool_context(),
        &ToolError::execution("tool failed"),
        Duration::from_millis(20),
    );
}

fn exercise_chat_hooks(hooks: &dyn ChatRuntimeHooks) {
    let session_id = SessionId::from("session-1");

    hooks.on_turn_start(&session_id);
    hooks.on_completion(
        TurnPhase::Probe,
        &session_id,
        1,
        TokenUsage::default(),
        Duration::from_millis(5),
    );
    hooks.on_tool_round(
        TurnPhase::Probe,
        &session_id,
        1,
        &[ToolResult::error("foo", "Error: unknown tool 'foo'")],
    );
    hooks.on_turn_success(&session_id, &sample_outcome(), Duration::from_millis(30));
    hooks.on_turn_failure(
        &session_id,
        &ChatError::timeout("completion timed out after 30ms").with_step(2),
        Duration::from_millis(30),
    );
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    let hooks = TracingObservabilityHooks;
    exercise_tool_hooks(&hooks);
    exercise_chat_hooks(&hooks);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    let hooks = MetricsObservabilityHooks;
    exercise_tool_hooks(&hooks);
    exercise_chat_hooks(&hooks);
}

#[derive(Default, Clone)]
struct RecordingHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingHooks {
    fn record(&self, event: &'static str) {
        self.events.lock().expect("events lock").push(event);
    }

    fn events(&self) -> Vec<&'static str> {
        self.events.lock().expect("events lock").clone()
    }
}

impl ToolRuntimeHooks for RecordingHooks {
    fn on_execution_start(&self, _request: &ToolCallRequest, _context: &ToolExecutionContext) {
        self.record("execution_start");
    }

    fn on_execution_success(
        &self,
        _request: &ToolCallRequest,
        _context: &ToolExecutionContext,
        _result: &ToolResult,
        _elapsed: Duration,
    ) {
        self.record("execution_success");
    }

    fn on_execution_failure(
        &self,
        _request: &ToolCallRequest,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
        self.record("execution_failure");
    }
}

impl ChatRuntimeHooks for RecordingHooks {
    fn on_turn_start(&self, _session_id: &SessionId) {
        self.record("turn_start");
    }

    fn on_completion(
        &self,
        _phase: TurnPhase,
        _session_id: &SessionId,
        _step: u32,
        _usage: TokenUsage,
        _elapsed: Duration,
    ) {
        self.record("completion");
    }

    fn on_tool_round(
        &self,
        _phase: TurnPhase,
        _session_id: &SessionId,
        _step: u32,
        _results: &[ToolResult],
    ) {
        self.record("tool_round");
    }

    fn on_turn_success(&self, _session_id: &SessionId, _outcome: &TurnOutcome, _elapsed: Duration) {
        self.record("turn_success");
    }

    fn on_turn_failure(&self, _session_id: &SessionId, _error: &ChatError, _elapsed: Duration) {
        self.record("turn_failure");
    }
}

struct PanicHooks;

impl ToolRuntimeHooks for PanicHooks {
    fn on_execution_start(&self, _request: &ToolCallRequest, _context: &ToolExecutionContext) {
        panic!("start panic");
    }

    fn on_execution_failure(
        &self,
        _request: &ToolCallRequest,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
        panic!("failure panic");
    }
}

impl ChatRuntimeHooks for PanicHooks {
    fn on_turn_start(&self, _session_id: &SessionId) {
        panic!("turn start panic");
    }

    fn on_turn_success(&self, _session_id: &SessionId, _outcome: &TurnOutcome, _elapsed: Duration) {
        panic!("turn success panic");
    }
}

#[test]
fn safe_tool_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingHooks::default();
    exercise_tool_hooks(&SafeToolHooks::new(inner.clone()));
    assert_eq!(
        inner.events(),
        vec!["execution_start", "execution_success", "execution_failure"]
    );
}

#[test]
fn safe_chat_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingHooks::default();
    exercise_chat_hooks(&SafeChatHooks::new(inner.clone()));
    assert_eq!(
        inner.events(),
        vec!["turn_start", "completion", "tool_round", "turn_success", "turn_failure"]
    );
}

#[test]
fn safe_hooks_swallow_panics() {
    exercise_tool_hooks(&SafeToolHooks::new(PanicHooks));
    exercise_chat_hooks(&SafeChatHooks::new(PanicHooks));
}

struct Greeter;

impl CompletionService for Greeter {
    fn name(&self) -> &str {
        "greeter"
    }

    fn complete<'a>(
        &'a self,
        _request: CompletionRequest,
    ) -> ProviderFuture<'a, Result<CompletionResponse, ProviderError>> {
        Box::pin(async { Ok(CompletionResponse::assistant("NO")) })
    }
}

#[tokio::test]
async fn panicking_chat_hooks_do_not_break_a_turn() {
    let recorder = RecordingHooks::default();
    let mut session = ChatSession::builder(Arc::new(Greeter))
        .hooks(Arc::new(SafeChatHooks::new(PanicHooks)))
        .build()
        .expect("session builds");

    let outcome = session.run_turn("hello").await.expect("turn still succeeds");
    assert_eq!(outcome.text(), "NO");

    let mut observed = ChatSession::builder(Arc::new(Greeter))
        .hooks(Arc::new(SafeChatHooks::new(recorder.clone())))
        .build()
        .expect("session builds");
    observed.run_turn("hello").await.expect("turn ok");

    assert_eq!(
        recorder.events(),
        vec!["turn_start", "completion", "completion", "turn_success"]
    );
}
