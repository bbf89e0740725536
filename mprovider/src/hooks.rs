//! Operational hook contracts and a provider wrapper that reports to them.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{CompletionProvider, ProviderDescriptor, ProviderError, ProviderFuture};

pub trait ProviderOperationHooks: Send + Sync {
    fn on_request_start(&self, _provider: &ProviderDescriptor, _operation: &str) {}

    fn on_success(&self, _provider: &ProviderDescriptor, _operation: &str, _elapsed: Duration) {}

    fn on_failure(
        &self,
        _provider: &ProviderDescriptor,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
    }

    fn on_health_check(&self, _provider: &ProviderDescriptor, _healthy: bool) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}

/// Wraps a provider and reports every `generate` and `check_health` call to hooks.
pub struct ObservedProvider<P> {
    inner: P,
    hooks: Arc<dyn ProviderOperationHooks>,
}

impl<P> ObservedProvider<P>
where
    P: CompletionProvider,
{
    pub fn new(inner: P, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        Self { inner, hooks }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P> CompletionProvider for ObservedProvider<P>
where
    P: CompletionProvider,
{
    fn descriptor(&self) -> ProviderDescriptor {
        self.inner.descriptor()
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        context: &'a str,
    ) -> ProviderFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            let descriptor = self.inner.descriptor();
            self.hooks.on_request_start(&descriptor, "generate");
            let started = Instant::now();

            let result = self.inner.generate(prompt, context).await;
            let elapsed = started.elapsed();
            match &result {
                Ok(_) => self.hooks.on_success(&descriptor, "generate", elapsed),
                Err(error) => self
                    .hooks
                    .on_failure(&descriptor, "generate", elapsed, error),
            }

            result
        })
    }

    fn check_health<'a>(&'a self) -> ProviderFuture<'a, bool> {
        Box::pin(async move {
            let healthy = self.inner.check_health().await;
            self.hooks
                .on_health_check(&self.inner.descriptor(), healthy);
            healthy
        })
    }
}
