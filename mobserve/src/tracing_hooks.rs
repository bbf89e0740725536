//! Tracing-based observability hooks for provider calls and exchanges.
//!
//! ```rust
//! use mchat::ExchangeHooks;
//! use mobserve::TracingObservabilityHooks;
//!
//! fn accepts_exchange_hooks(_hooks: &dyn ExchangeHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_exchange_hooks(&hooks);
//! ```

use std::time::Duration;

use mchat::{ChatError, ExchangeHooks, ExchangeIds, ExchangeOutcome, ExchangeReport};
use mcommon::SessionId;
use mprovider::{ProviderDescriptor, ProviderError, ProviderOperationHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ProviderOperationHooks for TracingObservabilityHooks {
    fn on_request_start(&self, provider: &ProviderDescriptor, operation: &str) {
        tracing::info!(
            phase = "provider",
            event = "request_start",
            provider = %provider.id,
            model = provider.model,
            operation
        );
    }

    fn on_success(&self, provider: &ProviderDescriptor, operation: &str, elapsed: Duration) {
        tracing::info!(
            phase = "provider",
            event = "success",
            provider = %provider.id,
            model = provider.model,
            operation,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_failure(
        &self,
        provider: &ProviderDescriptor,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        tracing::error!(
            phase = "provider",
            event = "failure",
            provider = %provider.id,
            model = provider.model,
            operation,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }

    fn on_health_check(&self, provider: &ProviderDescriptor, healthy: bool) {
        if healthy {
            tracing::info!(
                phase = "provider",
                event = "health_check",
                provider = %provider.id,
                model = provider.model,
                healthy
            );
        } else {
            tracing::warn!(
                phase = "provider",
                event = "health_check",
                provider = %provider.id,
                model = provider.model,
                healthy
            );
        }
    }
}

impl ExchangeHooks for TracingObservabilityHooks {
    fn on_submit_rejected(&self, session: &SessionId, error: &ChatError) {
        tracing::debug!(
            phase = "exchange",
            event = "submit_rejected",
            session_id = %session,
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_exchange_start(&self, session: &SessionId, ids: ExchangeIds) {
        tracing::info!(
            phase = "exchange",
            event = "start",
            session_id = %session,
            user_message_id = ids.user.get(),
            assistant_message_id = ids.assistant.get()
        );
    }

    fn on_exchange_settled(&self, session: &SessionId, report: &ExchangeReport) {
        let elapsed_ms = report.elapsed.as_millis() as u64;
        match &report.outcome {
            ExchangeOutcome::Completed => tracing::info!(
                phase = "exchange",
                event = "completed",
                session_id = %session,
                assistant_message_id = report.ids.assistant.get(),
                elapsed_ms,
                retained = report.retained
            ),
            ExchangeOutcome::Failed(error) => tracing::warn!(
                phase = "exchange",
                event = "failed",
                session_id = %session,
                assistant_message_id = report.ids.assistant.get(),
                elapsed_ms,
                retained = report.retained,
                error_kind = ?error.kind,
                error = %error
            ),
        }
    }

    fn on_cleared(&self, session: &SessionId, removed: usize, during_exchange: bool) {
        tracing::info!(
            phase = "exchange",
            event = "cleared",
            session_id = %session,
            removed,
            during_exchange
        );
    }
}
