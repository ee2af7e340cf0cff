//! Common `kprovider` imports for downstream crates.

pub use crate::{
    CompletionRequest, CompletionRequestBuilder, CompletionResponse, CompletionService, Message,
    ProviderError, ProviderErrorKind, ProviderFuture, Role, TokenUsage,
};
pub use kcommon::{BoxFuture, GenerationOptions, MetadataMap};
