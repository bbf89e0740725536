use std::sync::Arc;

use crate::{ProviderDescriptor, ProviderError};

pub type ProviderFuture<'a, T> = mcommon::BoxFuture<'a, T>;

/// One request/response cycle against a completion backend.
///
/// Implementations never retry: every failure is returned as a single
/// terminal outcome for that invocation.
pub trait CompletionProvider: Send + Sync {
    fn descriptor(&self) -> ProviderDescriptor;

    /// Whether the provider is configured well enough to be called at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Generates a completion for `prompt`. An empty `context` means no context.
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        context: &'a str,
    ) -> ProviderFuture<'a, Result<String, ProviderError>>;

    /// Lightweight reachability check. Never fails; unreachable is `false`.
    fn check_health<'a>(&'a self) -> ProviderFuture<'a, bool> {
        let available = self.is_available();
        Box::pin(async move { available })
    }
}

impl<P> CompletionProvider for Arc<P>
where
    P: CompletionProvider + ?Sized,
{
    fn descriptor(&self) -> ProviderDescriptor {
        (**self).descriptor()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        context: &'a str,
    ) -> ProviderFuture<'a, Result<String, ProviderError>> {
        (**self).generate(prompt, context)
    }

    fn check_health<'a>(&'a self) -> ProviderFuture<'a, bool> {
        (**self).check_health()
    }
}
