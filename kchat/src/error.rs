//! Chat-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kcommon::DeadlineExceeded;
use kprovider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    Provider,
    Timeout,
}

/// A turn that could not complete.
///
/// Everything appended to the conversation before the failure stays in place, so the
/// session remains usable for the next turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
    pub retryable: bool,
    /// Completion round-trip (1-based) during which the failure happened.
    pub step: Option<u32>,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
            step: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message, false)
    }

    pub fn provider(message: impl Into<String>, retryable: bool) -> Self {
        Self::new(ChatErrorKind::Provider, message, retryable)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Timeout, message, true)
    }

    pub fn with_step(mut self, step: u32) -> Self {
        self.step = Some(step);
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.step {
            Some(step) => write!(f, "{:?} [step={}]: {}", self.kind, step, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ChatError {}

impl From<ProviderError> for ChatError {
    fn from(value: ProviderError) -> Self {
        let kind = match value.kind {
            ProviderErrorKind::InvalidRequest => ChatErrorKind::InvalidRequest,
            ProviderErrorKind::Timeout => ChatErrorKind::Timeout,
            _ => ChatErrorKind::Provider,
        };
        ChatError::new(kind, value.to_string(), value.retryable)
    }
}

impl From<DeadlineExceeded> for ChatError {
    fn from(value: DeadlineExceeded) -> Self {
        ChatError::timeout(format!("completion {value}"))
    }
}
