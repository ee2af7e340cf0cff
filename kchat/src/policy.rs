//! Turn-loop configuration.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use kchat::ChatPolicy;
//!
//! let policy = ChatPolicy::compact()
//!     .with_max_steps(4)
//!     .with_final_answer_marker("Final Answer:")
//!     .with_tool_timeout(Duration::from_secs(2));
//!
//! assert!(policy.validate().is_ok());
//! assert_eq!(policy.generation.max_tokens, Some(128));
//! ```

use std::time::Duration;

use kcommon::GenerationOptions;

use crate::ChatError;

pub const DEFAULT_MAX_STEPS: u32 = 3;

pub const DEFAULT_PROBE_PREAMBLE: &str = "Based on the user input above, check whether you \
need one of the following tools. Reply with only a JSON list of tool calls in the format \
[{\"name\":\"<tool>\",\"params\":{...}}] and no other text. If you don't need any tool, \
reply NO.\nAvailable tools:";

pub const DEFAULT_RESULTS_PREAMBLE: &str =
    "Use the results of these tools to answer the following user message:";

#[derive(Debug, Clone, PartialEq)]
pub struct ChatPolicy {
    /// Upper bound on completion round-trips per turn, probe included.
    pub max_steps: u32,
    pub tool_probe: bool,
    pub system_prompt: Option<String>,
    pub probe_preamble: String,
    pub results_preamble: String,
    /// When set, a reply containing this marker ends the turn with the text after it.
    pub final_answer_marker: Option<String>,
    pub completion_timeout: Option<Duration>,
    pub tool_timeout: Option<Duration>,
    pub parallel_tools: bool,
    pub generation: GenerationOptions,
}

impl Default for ChatPolicy {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            tool_probe: true,
            system_prompt: None,
            probe_preamble: DEFAULT_PROBE_PREAMBLE.to_string(),
            results_preamble: DEFAULT_RESULTS_PREAMBLE.to_string(),
            final_answer_marker: None,
            completion_timeout: None,
            tool_timeout: None,
            parallel_tools: false,
            generation: GenerationOptions::default(),
        }
    }
}

impl ChatPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Short replies at low temperature, sized for small local models.
    pub fn compact() -> Self {
        Self::default().with_generation(
            GenerationOptions::default()
                .with_max_tokens(128)
                .with_temperature(0.3),
        )
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_tool_probe(mut self, enabled: bool) -> Self {
        self.tool_probe = enabled;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_probe_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.probe_preamble = preamble.into();
        self
    }

    pub fn with_results_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.results_preamble = preamble.into();
        self
    }

    pub fn with_final_answer_marker(mut self, marker: impl Into<String>) -> Self {
        self.final_answer_marker = Some(marker.into());
        self
    }

    pub fn with_completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = Some(timeout);
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = Some(timeout);
        self
    }

    pub fn with_parallel_tools(mut self, parallel: bool) -> Self {
        self.parallel_tools = parallel;
        self
    }

    pub fn with_generation(mut self, generation: GenerationOptions) -> Self {
        self.generation = generation;
        self
    }

    pub fn validate(&self) -> Result<(), ChatError> {
        if self.max_steps == 0 {
            return Err(ChatError::invalid_request("max_steps must be at least 1"));
        }

        if self.tool_probe && self.max_steps < 2 {
            return Err(ChatError::invalid_request(
                "max_steps must be at least 2 when the tool probe is enabled",
            ));
        }

        if let Some(marker) = &self.final_answer_marker
            && marker.trim().is_empty()
        {
            return Err(ChatError::invalid_request(
                "final_answer_marker must not be blank",
            ));
        }

        if self.generation.max_tokens == Some(0) {
            return Err(ChatError::invalid_request(
                "max_tokens must be greater than zero",
            ));
        }

        if let Some(temperature) = self.generation.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(ChatError::invalid_request(
                "temperature must be in the inclusive range 0.0..=2.0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChatErrorKind;

    #[test]
    fn defaults_are_valid() {
        let policy = ChatPolicy::default();
        assert_eq!(policy.max_steps, 3);
        assert!(policy.tool_probe);
        assert!(!policy.parallel_tools);
        assert_eq!(policy.final_answer_marker, None);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn probe_needs_room_for_a_durable_step() {
        let error = ChatPolicy::default()
            .with_max_steps(1)
            .validate()
            .expect_err("probe plus one step does not fit");
        assert_eq!(error.kind, ChatErrorKind::InvalidRequest);

        assert!(
            ChatPolicy::default()
                .with_max_steps(1)
                .with_tool_probe(false)
                .validate()
                .is_ok()
        );
        assert!(ChatPolicy::default().with_max_steps(0).with_tool_probe(false).validate().is_err());
    }

    #[test]
    fn rejects_blank_marker_and_bad_generation() {
        assert!(ChatPolicy::default().with_final_answer_marker("  ").validate().is_err());
        assert!(
            ChatPolicy::default()
                .with_generation(GenerationOptions::default().with_temperature(3.5))
                .validate()
                .is_err()
        );
        assert!(
            ChatPolicy::default()
                .with_generation(GenerationOptions::default().with_max_tokens(0))
                .validate()
                .is_err()
        );
    }

    #[test]
    fn compact_uses_short_low_temperature_generation() {
        let policy = ChatPolicy::compact();
        assert_eq!(policy.generation.max_tokens, Some(128));
        assert_eq!(policy.generation.temperature, Some(0.3));
    }
}
