//! Metrics-based observability hooks for provider calls and exchanges.
//!
//! ```rust
//! use mobserve::MetricsObservabilityHooks;
//! use mprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use mchat::{ChatError, ExchangeHooks, ExchangeIds, ExchangeOutcome, ExchangeReport};
use mcommon::SessionId;
use mprovider::{ProviderDescriptor, ProviderError, ProviderOperationHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_request_start(&self, provider: &ProviderDescriptor, operation: &str) {
        metrics::counter!(
            "mixchat_provider_request_start_total",
            "provider" => provider.id.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_success(&self, provider: &ProviderDescriptor, operation: &str, elapsed: Duration) {
        metrics::counter!(
            "mixchat_provider_success_total",
            "provider" => provider.id.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "mixchat_provider_request_duration_seconds",
            "provider" => provider.id.to_string(),
            "operation" => operation.to_string(),
            "outcome" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_failure(
        &self,
        provider: &ProviderDescriptor,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "mixchat_provider_failure_total",
            "provider" => provider.id.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "mixchat_provider_request_duration_seconds",
            "provider" => provider.id.to_string(),
            "operation" => operation.to_string(),
            "outcome" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_health_check(&self, provider: &ProviderDescriptor, healthy: bool) {
        metrics::gauge!(
            "mixchat_provider_healthy",
            "provider" => provider.id.to_string()
        )
        .set(if healthy { 1.0 } else { 0.0 });
    }
}

impl ExchangeHooks for MetricsObservabilityHooks {
    fn on_submit_rejected(&self, _session: &SessionId, error: &ChatError) {
        metrics::counter!(
            "mixchat_exchange_rejected_total",
            "reason" => format!("{:?}", error.kind)
        )
        .increment(1);
    }

    fn on_exchange_start(&self, _session: &SessionId, _ids: ExchangeIds) {
        metrics::counter!("mixchat_exchange_start_total").increment(1);
    }

    fn on_exchange_settled(&self, _session: &SessionId, report: &ExchangeReport) {
        let outcome = match &report.outcome {
            ExchangeOutcome::Completed => "completed".to_string(),
            ExchangeOutcome::Failed(error) => format!("failed_{:?}", error.kind),
        };
        metrics::counter!(
            "mixchat_exchange_settled_total",
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!("mixchat_exchange_duration_seconds")
            .record(report.elapsed.as_secs_f64());
        if !report.retained {
            metrics::counter!("mixchat_exchange_discarded_total").increment(1);
        }
    }

    fn on_cleared(&self, _session: &SessionId, removed: usize, _during_exchange: bool) {
        metrics::counter!("mixchat_conversation_cleared_total").increment(1);
        metrics::histogram!("mixchat_conversation_cleared_messages").record(removed as f64);
    }
}
