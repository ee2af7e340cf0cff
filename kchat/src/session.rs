//! Session state and the bounded tool-augmented turn loop.
//!
//! A turn runs in two phases. The probe sends the user text plus a tool catalogue in a
//! throwaway request; tool results it triggers are stored as a system message ahead of
//! the user message. The durable phase then queries over the stored conversation until
//! the model answers or the step budget runs out.

use std::sync::Arc;
use std::time::Instant;

use kcommon::{SessionId, with_deadline};
use kprovider::{CompletionRequest, CompletionResponse, CompletionService, Message, TokenUsage};
use ktooling::{
    NoopToolRuntimeHooks, ToolCallRequest, ToolDispatcher, ToolExecutionContext, ToolRegistry,
    ToolResult, ToolRuntime, ToolRuntimeHooks, execute_all,
};

use crate::{
    ChatError, ChatPolicy, ChatRuntimeHooks, Conversation, NoopChatRuntimeHooks, ParsedOutput,
    TurnOutcome, TurnPhase, TurnTermination, parse_model_output, probe_instructions, probe_prompt,
    results_message,
};

enum ToolSource {
    Registry(Arc<ToolRegistry>),
    Runtime(Arc<dyn ToolRuntime>),
}

pub struct ChatSessionBuilder {
    service: Arc<dyn CompletionService>,
    session_id: Option<SessionId>,
    tools: ToolSource,
    tool_hooks: Arc<dyn ToolRuntimeHooks>,
    policy: ChatPolicy,
    hooks: Arc<dyn ChatRuntimeHooks>,
    history: Vec<Message>,
}

impl ChatSessionBuilder {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self {
            service,
            session_id: None,
            tools: ToolSource::Registry(Arc::new(ToolRegistry::new())),
            tool_hooks: Arc::new(NoopToolRuntimeHooks),
            policy: ChatPolicy::default(),
            hooks: Arc::new(NoopChatRuntimeHooks),
            history: Vec::new(),
        }
    }

    pub fn session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Dispatches through a [`ToolDispatcher`] built with the policy's tool timeout.
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tools = ToolSource::Registry(registry);
        self
    }

    /// Uses a caller-provided runtime as-is; policy tool timeouts do not apply to it.
    pub fn tool_runtime(mut self, runtime: Arc<dyn ToolRuntime>) -> Self {
        self.tools = ToolSource::Runtime(runtime);
        self
    }

    pub fn tool_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.tool_hooks = hooks;
        self
    }

    pub fn policy(mut self, policy: ChatPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn ChatRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Seeds the conversation with earlier messages.
    pub fn history(mut self, messages: Vec<Message>) -> Self {
        self.history = messages;
        self
    }

    pub fn build(self) -> Result<ChatSession, ChatError> {
        self.policy.validate()?;

        let tools: Arc<dyn ToolRuntime> = match self.tools {
            ToolSource::Registry(registry) => Arc::new(
                ToolDispatcher::new(registry)
                    .with_hooks(self.tool_hooks)
                    .with_timeout(self.policy.tool_timeout),
            ),
            ToolSource::Runtime(runtime) => runtime,
        };

        let mut conversation = Conversation::from_messages(self.history);
        if conversation.is_empty()
            && let Some(system_prompt) = &self.policy.system_prompt
        {
            conversation.append(Message::system(system_prompt.clone()));
        }

        Ok(ChatSession {
            id: self
                .session_id
                .unwrap_or_else(|| SessionId::new("default")),
            service: self.service,
            tools,
            policy: self.policy,
            hooks: self.hooks,
            conversation,
        })
    }
}

/// One conversation driven against a completion service.
///
/// `run_turn` takes `&mut self`, so a session never runs two turns at once. Independent
/// sessions can share the same service and tools.
pub struct ChatSession {
    id: SessionId,
    service: Arc<dyn CompletionService>,
    tools: Arc<dyn ToolRuntime>,
    policy: ChatPolicy,
    hooks: Arc<dyn ChatRuntimeHooks>,
    conversation: Conversation,
}

#[derive(Default)]
struct TurnState {
    steps: u32,
    usage: TokenUsage,
    tool_results: Vec<ToolResult>,
}

impl TurnState {
    fn finish(self, reply: Message, termination: TurnTermination) -> TurnOutcome {
        TurnOutcome {
            reply,
            termination,
            steps: self.steps,
            tool_results: self.tool_results,
            usage: self.usage,
        }
    }
}

impl ChatSession {
    pub fn builder(service: Arc<dyn CompletionService>) -> ChatSessionBuilder {
        ChatSessionBuilder::new(service)
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn policy(&self) -> &ChatPolicy {
        &self.policy
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Runs one user turn. Blank input is rejected before any completion is requested.
    pub async fn run_turn(&mut self, user_text: &str) -> Result<TurnOutcome, ChatError> {
        if user_text.trim().is_empty() {
            return Err(ChatError::invalid_request("user text must not be empty"));
        }

        let started = Instant::now();
        self.hooks.on_turn_start(&self.id);

        let result = self.drive_turn(user_text).await;
        match &result {
            Ok(outcome) => {
                tracing::debug!(
                    session_id = %self.id,
                    steps = outcome.steps,
                    termination = ?outcome.termination,
                    "turn completed"
                );
                self.hooks
                    .on_turn_success(&self.id, outcome, started.elapsed());
            }
            Err(error) => {
                tracing::debug!(session_id = %self.id, error = %error, "turn failed");
                self.hooks
                    .on_turn_failure(&self.id, error, started.elapsed());
            }
        }

        result
    }

    async fn drive_turn(&mut self, user_text: &str) -> Result<TurnOutcome, ChatError> {
        let mut state = TurnState::default();
        let context = ToolExecutionContext::new(self.id.clone());

        if self.policy.tool_probe {
            self.probe(user_text, &context, &mut state).await?;
        }

        self.conversation.append(Message::user(user_text));

        loop {
            let response = self
                .complete(TurnPhase::Durable, self.conversation.snapshot(), &mut state)
                .await?;
            let text = response.message.content;

            let calls = match parse_model_output(&text) {
                ParsedOutput::Answer(_) => {
                    let (reply, termination) = match self.final_answer(&text) {
                        Some(answer) => (
                            Message::assistant(answer),
                            TurnTermination::FinalAnswerMarker,
                        ),
                        None => (Message::assistant(text), TurnTermination::Answered),
                    };
                    self.conversation.append(reply.clone());
                    return Ok(state.finish(reply, termination));
                }
                ParsedOutput::ToolCalls(calls) => calls,
            };

            if state.steps >= self.policy.max_steps {
                tracing::debug!(
                    session_id = %self.id,
                    steps = state.steps,
                    "step budget exhausted with a pending directive"
                );
                return Ok(state.finish(
                    Message::assistant(text),
                    TurnTermination::StepBudgetExhausted,
                ));
            }

            self.conversation.append(Message::assistant(text));
            let results = self
                .run_tools(TurnPhase::Durable, &calls, &context, &mut state)
                .await;
            self.conversation.append(Message::system(results_message(
                &self.policy.results_preamble,
                &results,
            )));
        }
    }

    async fn probe(
        &mut self,
        user_text: &str,
        context: &ToolExecutionContext,
        state: &mut TurnState,
    ) -> Result<(), ChatError> {
        let instructions = probe_instructions(&self.policy.probe_preamble, &self.tools.specs());
        let mut messages = Vec::with_capacity(2);
        if let Some(system_prompt) = &self.policy.system_prompt {
            messages.push(Message::system(system_prompt.clone()));
        }
        messages.push(Message::user(probe_prompt(user_text, &instructions)));

        let response = self.complete(TurnPhase::Probe, messages, state).await?;
        match parse_model_output(response.text()) {
            ParsedOutput::ToolCalls(calls) => {
                let results = self
                    .run_tools(TurnPhase::Probe, &calls, context, state)
                    .await;
                self.conversation.append(Message::system(results_message(
                    &self.policy.results_preamble,
                    &results,
                )));
            }
            ParsedOutput::Answer(_) => {
                tracing::debug!(session_id = %self.id, "probe requested no tools");
            }
        }

        Ok(())
    }

    async fn complete(
        &self,
        phase: TurnPhase,
        messages: Vec<Message>,
        state: &mut TurnState,
    ) -> Result<CompletionResponse, ChatError> {
        state.steps += 1;
        let step = state.steps;

        let request = CompletionRequest::builder()
            .messages(messages)
            .options(self.policy.generation.clone())
            .metadata("session_id", self.id.as_str())
            .metadata("phase", phase.to_string())
            .build()
            .map_err(|error| ChatError::from(error).with_step(step))?;

        let started = Instant::now();
        let response = with_deadline(self.service.complete(request), self.policy.completion_timeout)
            .await
            .map_err(|error| ChatError::from(error).with_step(step))?
            .map_err(|error| ChatError::from(error).with_step(step))?;

        state.usage.accumulate(response.usage);
        self.hooks
            .on_completion(phase, &self.id, step, response.usage, started.elapsed());
        tracing::debug!(
            session_id = %self.id,
            phase = %phase,
            step,
            service = self.service.name(),
            "completion received"
        );

        Ok(response)
    }

    async fn run_tools(
        &self,
        phase: TurnPhase,
        calls: &[ToolCallRequest],
        context: &ToolExecutionContext,
        state: &mut TurnState,
    ) -> Vec<ToolResult> {
        tracing::debug!(
            session_id = %self.id,
            phase = %phase,
            calls = calls.len(),
            "dispatching tool calls"
        );

        let results = execute_all(
            self.tools.as_ref(),
            calls,
            context,
            self.policy.parallel_tools,
        )
        .await;

        self.hooks
            .on_tool_round(phase, &self.id, state.steps, &results);
        state.tool_results.extend(results.iter().cloned());
        results
    }

    /// Text after the final-answer marker, when a line of the answer opens with it.
    fn final_answer(&self, text: &str) -> Option<String> {
        let marker = self.policy.final_answer_marker.as_deref()?;
        let mut offset = 0;
        for line in text.split_inclusive('\n') {
            let indent = line.len() - line.trim_start().len();
            if line[indent..].starts_with(marker) {
                let start = offset + indent + marker.len();
                return Some(text[start..].trim().to_string());
            }
            offset += line.len();
        }
        None
    }
}
