//! Tool trait contract for registry-managed capabilities.
//!
//! ```rust
//! use ktooling::{FunctionTool, ParamType, Tool, ToolSpec, required_string};
//!
//! let tool = FunctionTool::new(
//!     ToolSpec::new("echo", "Echoes input").param("text", ParamType::String),
//!     |args, _ctx| async move { required_string(&args, "text") },
//! );
//!
//! assert_eq!(tool.spec().name, "echo");
//! ```

use std::future::Future;
use std::sync::Arc;

use kcommon::BoxFuture;

use crate::{ToolArgs, ToolError, ToolExecutionContext, ToolSpec};

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

pub trait Tool: Send + Sync {
    fn spec(&self) -> &ToolSpec;

    /// Runs the tool with arguments already shaped by the spec's schema.
    fn invoke<'a>(
        &'a self,
        args: ToolArgs,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>>;
}

type ToolHandler = dyn Fn(ToolArgs, ToolExecutionContext) -> ToolFuture<'static, Result<String, ToolError>>
    + Send
    + Sync;

pub struct FunctionTool {
    spec: ToolSpec,
    handler: Arc<ToolHandler>,
}

impl FunctionTool {
    pub fn new<F, Fut>(spec: ToolSpec, handler: F) -> Self
    where
        F: Fn(ToolArgs, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        let handler: Arc<ToolHandler> =
            Arc::new(move |args, context| Box::pin(handler(args, context)));

        Self { spec, handler }
    }

    pub fn from_sync<F>(spec: ToolSpec, handler: F) -> Self
    where
        F: Fn(ToolArgs, ToolExecutionContext) -> Result<String, ToolError> + Send + Sync + 'static,
    {
        Self::new(spec, move |args, context| {
            let output = handler(args, context);
            async move { output }
        })
    }
}

impl Tool for FunctionTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn invoke<'a>(
        &'a self,
        args: ToolArgs,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        (self.handler)(args, context.clone())
    }
}
