//! Completion service contract for the kestrel agent loop.
//!
//! The backend that produces model text is opaque: anything implementing
//! [`CompletionService`] can drive a session, from a local MLX pipeline to a
//! scripted fake in tests.
//!
//! ```rust
//! use kprovider::{CompletionRequest, CompletionResponse, CompletionService, Message};
//! use kprovider::{ProviderError, ProviderFuture};
//!
//! struct Parrot;
//!
//! impl CompletionService for Parrot {
//!     fn name(&self) -> &str {
//!         "parrot"
//!     }
//!
//!     fn complete<'a>(
//!         &'a self,
//!         request: CompletionRequest,
//!     ) -> ProviderFuture<'a, Result<CompletionResponse, ProviderError>> {
//!         Box::pin(async move {
//!             let last = request.messages.last().map(|m| m.content.clone()).unwrap_or_default();
//!             Ok(CompletionResponse::assistant(last))
//!         })
//!     }
//! }
//!
//! let request = CompletionRequest::new_validated(vec![Message::user("hello")]).unwrap();
//! let _pending = Parrot.complete(request);
//! ```

mod error;
mod model;
mod provider;

pub mod prelude;

pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    CompletionRequest, CompletionRequestBuilder, CompletionResponse, Message, Role, TokenUsage,
};
pub use provider::{CompletionService, ProviderFuture};
