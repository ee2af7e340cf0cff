//! Tool registry keyed by tool name.
//!
//! Populated once during start-up and then frozen behind an `Arc`.
//!
//! ```rust
//! use ktooling::{ToolErrorKind, ToolRegistry, ToolSpec};
//!
//! let mut registry = ToolRegistry::new();
//! registry
//!     .register_sync_fn(ToolSpec::new("ping", "Replies pong"), |_, _| Ok("pong".to_string()))
//!     .expect("first registration");
//!
//! let duplicate = registry
//!     .register_sync_fn(ToolSpec::new("ping", "Again"), |_, _| Ok(String::new()))
//!     .expect_err("names are unique");
//! assert_eq!(duplicate.kind, ToolErrorKind::Duplicate);
//! assert!(registry.lookup("ping").is_some());
//! ```

use std::future::Future;
use std::sync::Arc;

use kcommon::Registry;

use crate::{FunctionTool, Tool, ToolArgs, ToolError, ToolExecutionContext, ToolSpec};

#[derive(Default)]
pub struct ToolRegistry {
    tools: Registry<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T>(&mut self, tool: T) -> Result<(), ToolError>
    where
        T: Tool + 'static,
    {
        self.register_shared(Arc::new(tool))
    }

    pub fn register_shared(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let spec = tool.spec();
        spec.validate()?;

        let name = spec.name.clone();
        self.tools.try_insert(name.clone(), tool).map_err(|_| {
            ToolError::duplicate(format!("tool '{name}' is already registered"))
                .with_tool_name(name.clone())
        })
    }

    pub fn register_fn<F, Fut>(&mut self, spec: ToolSpec, handler: F) -> Result<(), ToolError>
    where
        F: Fn(ToolArgs, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        self.register(FunctionTool::new(spec, handler))
    }

    pub fn register_sync_fn<F>(&mut self, spec: ToolSpec, handler: F) -> Result<(), ToolError>
    where
        F: Fn(ToolArgs, ToolExecutionContext) -> Result<String, ToolError> + Send + Sync + 'static,
    {
        self.register(FunctionTool::from_sync(spec, handler))
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Specs sorted by tool name.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|tool| tool.spec().clone()).collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParamType, ToolErrorKind};

    fn echo_spec() -> ToolSpec {
        ToolSpec::new("echo", "Echoes text").param("text", ParamType::String)
    }

    #[test]
    fn registry_tracks_registered_tools() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry
            .register_sync_fn(echo_spec(), |_, _| Ok("hi".to_string()))
            .expect("echo registers");
        registry
            .register_sync_fn(ToolSpec::new("add", "Adds"), |_, _| Ok("0".to_string()))
            .expect("add registers");

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("echo"));
        assert_eq!(registry.names(), vec!["add".to_string(), "echo".to_string()]);
        assert_eq!(registry.specs()[1], echo_spec());
    }

    #[test]
    fn duplicate_registration_keeps_the_original_tool() {
        let mut registry = ToolRegistry::new();
        registry
            .register_sync_fn(echo_spec(), |_, _| Ok("first".to_string()))
            .expect("first registers");

        let error = registry
            .register_sync_fn(
                ToolSpec::new("echo", "Imposter").param("text", ParamType::Json),
                |_, _| Ok("second".to_string()),
            )
            .expect_err("duplicate must fail");

        assert_eq!(error.kind, ToolErrorKind::Duplicate);
        assert_eq!(error.tool_name.as_deref(), Some("echo"));
        let kept = registry.lookup("echo").expect("echo still registered");
        assert_eq!(kept.spec().description, "Echoes text");
    }

    #[test]
    fn invalid_spec_is_rejected_before_insertion() {
        let mut registry = ToolRegistry::new();
        let error = registry
            .register_sync_fn(ToolSpec::new("", "nameless"), |_, _| Ok(String::new()))
            .expect_err("blank name must fail");

        assert_eq!(error.kind, ToolErrorKind::InvalidArguments);
        assert!(registry.is_empty());
    }

    #[test]
    fn lookup_of_unknown_name_is_none() {
        let registry = ToolRegistry::new();
        assert!(registry.lookup("foo").is_none());
    }
}
