//! Completion request, response, and message model types.
//!
//! ```rust
//! use kprovider::{CompletionRequest, Message, ProviderErrorKind, Role};
//!
//! let ok = CompletionRequest::new_validated(vec![Message::new(Role::User, "What time is it?")]);
//! assert!(ok.is_ok());
//!
//! let err = CompletionRequest::new_validated(Vec::new())
//!     .err()
//!     .expect("empty history should fail");
//! assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
//! ```

use std::fmt::{Display, Formatter};

use kcommon::{GenerationOptions, MetadataMap};

use crate::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        };

        f.write_str(role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn accumulate(&mut self, other: TokenUsage) {
        self.input_tokens = self.input_tokens.saturating_add(other.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(other.output_tokens);
        self.total_tokens = self.total_tokens.saturating_add(other.total_tokens);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub message: Message,
    pub usage: TokenUsage,
}

impl CompletionResponse {
    pub fn new(message: Message) -> Self {
        Self {
            message,
            usage: TokenUsage::default(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Message::assistant(content))
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }

    pub fn text(&self) -> &str {
        &self.message.content
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub options: GenerationOptions,
    pub metadata: MetadataMap,
}

impl CompletionRequest {
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::new()
    }

    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            options: GenerationOptions::default(),
            metadata: MetadataMap::new(),
        }
    }

    pub fn new_validated(messages: Vec<Message>) -> Result<Self, ProviderError> {
        let request = Self::new(messages);
        request.validate()?;
        Ok(request)
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.messages.is_empty() {
            return Err(ProviderError::invalid_request(
                "at least one message is required",
            ));
        }

        if let Some(max_tokens) = self.options.max_tokens
            && max_tokens == 0
        {
            return Err(ProviderError::invalid_request(
                "max_tokens must be greater than zero",
            ));
        }

        if let Some(temperature) = self.options.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(ProviderError::invalid_request(
                "temperature must be in the inclusive range 0.0..=2.0",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompletionRequestBuilder {
    messages: Vec<Message>,
    options: GenerationOptions,
    metadata: MetadataMap,
}

impl CompletionRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<CompletionRequest, ProviderError> {
        let request = CompletionRequest {
            messages: self.messages,
            options: self.options,
            metadata: self.metadata,
        };

        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;

    #[test]
    fn builder_keeps_message_order_and_metadata() {
        let request = CompletionRequest::builder()
            .message(Message::system("be brief"))
            .messages(vec![Message::user("hi"), Message::assistant("hello")])
            .metadata("session_id", "s1")
            .build()
            .expect("request should build");

        let roles: Vec<Role> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(request.metadata.get("session_id").map(String::as_str), Some("s1"));
    }

    #[test]
    fn validate_rejects_out_of_range_generation_options() {
        let zero_tokens = CompletionRequest::new(vec![Message::user("hi")])
            .with_options(GenerationOptions::default().with_max_tokens(0));
        assert_eq!(
            zero_tokens.validate().expect_err("zero tokens").kind,
            ProviderErrorKind::InvalidRequest
        );

        let hot = CompletionRequest::new(vec![Message::user("hi")])
            .with_options(GenerationOptions::default().with_temperature(3.5));
        assert!(hot.validate().is_err());
    }

    #[test]
    fn usage_accumulates_across_responses() {
        let mut total = TokenUsage::default();
        total.accumulate(TokenUsage {
            input_tokens: 10,
            output_tokens: 2,
            total_tokens: 12,
        });
        total.accumulate(TokenUsage {
            input_tokens: 5,
            output_tokens: 1,
            total_tokens: 6,
        });

        assert_eq!(total.total_tokens, 18);
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
