use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use mchat::{ChatError, ExchangeHooks, ExchangeIds, ExchangeReport};
use mcommon::SessionId;
use mprovider::{ProviderDescriptor, ProviderError, ProviderOperationHooks};

pub struct SafeProviderHooks<H> {
    inner: H,
}

impl<H> SafeProviderHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ProviderOperationHooks for SafeProviderHooks<H>
where
    H: ProviderOperationHooks,
{
    fn on_request_start(&self, provider: &ProviderDescriptor, operation: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_request_start(provider, operation)
        }));
    }

    fn on_success(&self, provider: &ProviderDescriptor, operation: &str, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(provider, operation, elapsed)
        }));
    }

    fn on_failure(
        &self,
        provider: &ProviderDescriptor,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(provider, operation, elapsed, error)
        }));
    }

    fn on_health_check(&self, provider: &ProviderDescriptor, healthy: bool) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_health_check(provider, healthy)
        }));
    }
}

pub struct SafeExchangeHooks<H> {
    inner: H,
}

impl<H> SafeExchangeHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ExchangeHooks for SafeExchangeHooks<H>
where
    H: ExchangeHooks,
{
    fn on_submit_rejected(&self, session: &SessionId, error: &ChatError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_submit_rejected(session, error)
        }));
    }

    fn on_exchange_start(&self, session: &SessionId, ids: ExchangeIds) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_exchange_start(session, ids)
        }));
    }

    fn on_exchange_settled(&self, session: &SessionId, report: &ExchangeReport) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_exchange_settled(session, report)
        }));
    }

    fn on_cleared(&self, session: &SessionId, removed: usize, during_exchange: bool) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_cleared(session, removed, during_exchange)
        }));
    }
}
