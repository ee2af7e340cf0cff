//! Reference tools: `echo`, `add`, `search`, and `get_current_time`.
//!
//! ```rust
//! use ktooling::{ToolRegistry, builtin};
//!
//! let mut registry = ToolRegistry::new();
//! builtin::register_all(&mut registry).expect("builtins register once");
//! assert_eq!(registry.names(), vec!["add", "echo", "get_current_time", "search"]);
//! ```

use serde_json::Value;

use crate::{ParamType, ToolError, ToolRegistry, ToolSpec, required_f64, required_string};

pub fn echo_spec() -> ToolSpec {
    ToolSpec::new("echo", "Repeats the given text back").param("text", ParamType::String)
}

pub fn add_spec() -> ToolSpec {
    ToolSpec::new("add", "Adds two numbers")
        .param("a", ParamType::Float)
        .param("b", ParamType::Float)
}

pub fn search_spec() -> ToolSpec {
    ToolSpec::new("search", "Searches for information on a topic")
        .param("query", ParamType::String)
}

pub fn current_time_spec() -> ToolSpec {
    ToolSpec::new("get_current_time", "Reports the current local time")
}

pub fn register_all(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    registry.register_sync_fn(echo_spec(), |args, _ctx| {
        Ok(format!("Echo: {}", required_string(&args, "text")?))
    })?;

    registry.register_sync_fn(add_spec(), |args, _ctx| {
        let sum = required_f64(&args, "a")? + required_f64(&args, "b")?;
        // `Value` keeps the trailing `.0` on whole floats: 2 + 3 renders as "5.0".
        Ok(Value::from(sum).to_string())
    })?;

    registry.register_sync_fn(search_spec(), |args, _ctx| {
        let query = required_string(&args, "query")?;
        Ok(format!("[search results for '{query}' (simulated)]"))
    })?;

    registry.register_sync_fn(current_time_spec(), |_args, _ctx| {
        Ok(format!(
            "Current time is {}",
            chrono::Local::now().format("%H:%M")
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{ToolCallRequest, ToolDispatcher, ToolExecutionContext};

    fn dispatcher() -> ToolDispatcher {
        let mut registry = ToolRegistry::new();
        register_all(&mut registry).expect("builtins register");
        ToolDispatcher::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn builtins_produce_expected_outputs() {
        let dispatcher = dispatcher();
        let context = ToolExecutionContext::new("builtin-test");

        let echo = dispatcher
            .dispatch(
                &ToolCallRequest::new("echo").with_param("text", "hi"),
                &context,
            )
            .await;
        assert_eq!(echo.output, "Echo: hi");

        let add = dispatcher
            .dispatch(
                &ToolCallRequest::new("add").with_param("a", 2).with_param("b", 3),
                &context,
            )
            .await;
        assert_eq!(add.output, "5.0");

        let search = dispatcher
            .dispatch(
                &ToolCallRequest::new("search").with_param("query", "rust"),
                &context,
            )
            .await;
        assert_eq!(search.output, "[search results for 'rust' (simulated)]");
    }

    #[tokio::test]
    async fn current_time_has_clock_shape() {
        let result = dispatcher()
            .dispatch(
                &ToolCallRequest::new("get_current_time"),
                &ToolExecutionContext::new("builtin-test"),
            )
            .await;

        let clock = result
            .output
            .strip_prefix("Current time is ")
            .expect("prefix present");
        assert_eq!(clock.len(), 5);
        assert_eq!(clock.as_bytes()[2], b':');
    }

    #[test]
    fn registering_twice_reports_duplicate() {
        let mut registry = ToolRegistry::new();
        register_all(&mut registry).expect("first pass");
        let error = register_all(&mut registry).expect_err("second pass collides");
        assert_eq!(error.kind, crate::ToolErrorKind::Duplicate);
    }
}
