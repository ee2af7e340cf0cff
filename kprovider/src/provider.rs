use std::sync::Arc;

use kcommon::BoxFuture;

use crate::{CompletionRequest, CompletionResponse, ProviderError};

pub type ProviderFuture<'a, T> = BoxFuture<'a, T>;

/// A backend that turns an ordered message history into one assistant message.
///
/// Implementations are shared across sessions, so they must hold no per-turn state.
pub trait CompletionService: Send + Sync {
    /// Short identifier used in logs and metrics labels.
    fn name(&self) -> &str;

    fn complete<'a>(
        &'a self,
        request: CompletionRequest,
    ) -> ProviderFuture<'a, Result<CompletionResponse, ProviderError>>;
}

impl<T> CompletionService for Arc<T>
where
    T: CompletionService + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn complete<'a>(
        &'a self,
        request: CompletionRequest,
    ) -> ProviderFuture<'a, Result<CompletionResponse, ProviderError>> {
        (**self).complete(request)
    }
}
