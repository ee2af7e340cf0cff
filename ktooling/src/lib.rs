//! Tool registration, argument coercion, and fault-isolated dispatch.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use ktooling::prelude::*;
//!
//! let mut registry = ToolRegistry::new();
//! registry
//!     .register_sync_fn(
//!         ToolSpec::new("echo", "Echoes text").param("text", ParamType::String),
//!         |args, _ctx| Ok(format!("Echo: {}", required_string(&args, "text")?)),
//!     )
//!     .expect("echo registers");
//!
//! let dispatcher = ToolDispatcher::new(Arc::new(registry));
//! assert_eq!(dispatcher.specs()[0].name, "echo");
//! ```

mod args;
pub mod builtin;
mod coerce;
mod dispatcher;
mod error;
mod hooks;
mod registry;
mod schema;
mod tool;
mod types;

pub mod prelude {
    pub use crate::{
        FunctionTool, ParamType, Tool, ToolArgs, ToolCallRequest, ToolDispatcher, ToolError,
        ToolErrorKind, ToolExecutionContext, ToolRegistry, ToolResult, ToolRuntime, ToolSpec,
        execute_all, required_f64, required_string,
    };
}

pub use args::{ToolArgs, optional_string, required_f64, required_string};
pub use coerce::{CoercedArgs, coerce_args, coerce_value};
pub use dispatcher::{ToolDispatcher, ToolRuntime, execute_all};
pub use error::{ToolError, ToolErrorKind};
pub use hooks::{NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use registry::ToolRegistry;
pub use schema::{ParamDecl, ParamSchema, ParamType, ToolSpec};
pub use tool::{FunctionTool, Tool, ToolFuture};
pub use types::{ToolCallRequest, ToolExecutionContext, ToolResult};
