//! Tool runtime trait and the registry-backed dispatcher.
//!
//! Dispatch never fails: unknown tools, handler errors, panics, and timeouts all come
//! back as error [`ToolResult`]s so the model can read them and correct itself.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::FutureExt;
use futures_util::future::join_all;
use kcommon::with_deadline;

use crate::{
    NoopToolRuntimeHooks, ToolCallRequest, ToolError, ToolErrorKind, ToolExecutionContext,
    ToolFuture, ToolRegistry, ToolResult, ToolRuntimeHooks, ToolSpec, coerce_args,
};

pub trait ToolRuntime: Send + Sync {
    /// Specs of every tool this runtime can execute.
    fn specs(&self) -> Vec<ToolSpec>;

    fn execute<'a>(
        &'a self,
        request: ToolCallRequest,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, ToolResult>;
}

#[derive(Clone)]
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
    hooks: Arc<dyn ToolRuntimeHooks>,
    timeout: Option<Duration>,
}

impl ToolDispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            hooks: Arc::new(NoopToolRuntimeHooks),
            timeout: None,
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Per-call deadline; an overrun becomes an error result.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }

    pub async fn dispatch(
        &self,
        request: &ToolCallRequest,
        context: &ToolExecutionContext,
    ) -> ToolResult {
        let started = Instant::now();
        self.hooks.on_execution_start(request, context);

        match self.invoke(request, context).await {
            Ok(output) => {
                let result = ToolResult::ok(request.name.clone(), output);
                self.hooks
                    .on_execution_success(request, context, &result, started.elapsed());
                result
            }
            Err(error) => {
                let error = error.with_tool_name(request.name.clone());
                self.hooks
                    .on_execution_failure(request, context, &error, started.elapsed());
                ToolResult::error(request.name.clone(), failure_text(&request.name, &error))
            }
        }
    }

    async fn invoke(
        &self,
        request: &ToolCallRequest,
        context: &ToolExecutionContext,
    ) -> Result<String, ToolError> {
        let tool = self
            .registry
            .lookup(&request.name)
            .ok_or_else(|| ToolError::not_found(format!("unknown tool '{}'", request.name)))?;

        let coerced = coerce_args(&tool.spec().params, &request.raw_params);
        if !coerced.passed_through.is_empty() {
            tracing::debug!(
                tool_name = %request.name,
                params = ?coerced.passed_through,
                "passing uncoercible arguments through unchanged"
            );
        }
        if !coerced.undeclared.is_empty() {
            tracing::debug!(
                tool_name = %request.name,
                params = ?coerced.undeclared,
                "dropping arguments the schema does not declare"
            );
        }

        // Sync handlers run inside `invoke` itself, so the call has to happen within the guard.
        let args = coerced.args;
        let invocation =
            AssertUnwindSafe(async move { tool.invoke(args, context).await }).catch_unwind();
        match with_deadline(invocation, self.timeout).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_panic)) => Err(ToolError::execution("handler panicked")),
            Err(elapsed) => Err(ToolError::timeout(elapsed.to_string())),
        }
    }
}

impl ToolRuntime for ToolDispatcher {
    fn specs(&self) -> Vec<ToolSpec> {
        self.registry.specs()
    }

    fn execute<'a>(
        &'a self,
        request: ToolCallRequest,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, ToolResult> {
        Box::pin(async move { self.dispatch(&request, context).await })
    }
}

/// Runs every request and returns results in request order.
///
/// With `parallel` the calls are polled concurrently; ordering is unaffected.
pub async fn execute_all(
    runtime: &dyn ToolRuntime,
    requests: &[ToolCallRequest],
    context: &ToolExecutionContext,
    parallel: bool,
) -> Vec<ToolResult> {
    if parallel {
        return join_all(
            requests
                .iter()
                .map(|request| runtime.execute(request.clone(), context)),
        )
        .await;
    }

    let mut results = Vec::with_capacity(requests.len());
    for request in requests {
        results.push(runtime.execute(request.clone(), context).await);
    }
    results
}

fn failure_text(name: &str, error: &ToolError) -> String {
    match error.kind {
        ToolErrorKind::NotFound => format!("Error: unknown tool '{name}'"),
        _ => format!("Failed to call tool {name}: {}", error.message),
    }
}
