//! Observability hooks for tool dispatch and chat turns.
//!
//! ```rust
//! use kobserve::{MetricsObservabilityHooks, SafeChatHooks, SafeToolHooks, TracingObservabilityHooks};
//!
//! let _tool_hooks = SafeToolHooks::new(TracingObservabilityHooks);
//! let _chat_hooks = SafeChatHooks::new(MetricsObservabilityHooks);
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeChatHooks, SafeToolHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeChatHooks, SafeToolHooks, TracingObservabilityHooks,
    };
}

#[cfg(test)]
mod tests;
