//! Runtime wiring: environment to provider to orchestrator.

use std::sync::Arc;

use mobserve::{SafeExchangeHooks, SafeProviderHooks, TracingObservabilityHooks};

use crate::{
    AccessGate, AlwaysAuthorized, ChatConfig, CompletionProvider, ConfigError, ExchangeOrchestrator,
    ObservedProvider, ProviderBuildConfig, build_provider_with_config,
};

/// Builds the configured provider and wraps it in tracing hooks.
pub fn observed_provider(config: &ChatConfig) -> Result<Arc<dyn CompletionProvider>, ConfigError> {
    let provider = build_provider_with_config(ProviderBuildConfig::from_chat_config(config))?;
    let hooks = Arc::new(SafeProviderHooks::new(TracingObservabilityHooks));

    Ok(Arc::new(ObservedProvider::new(provider, hooks)))
}

/// An orchestrator over `provider` with tracing exchange hooks.
pub async fn orchestrator_with(
    provider: Arc<dyn CompletionProvider>,
    gate: Arc<dyn AccessGate>,
) -> Result<ExchangeOrchestrator, ConfigError> {
    let orchestrator = ExchangeOrchestrator::builder(provider)
        .gate(gate)
        .hooks(Arc::new(SafeExchangeHooks::new(TracingObservabilityHooks)))
        .build()
        .await?;

    tracing::info!(
        phase = "runtime",
        event = "ready",
        provider = %orchestrator.descriptor(),
        provider_available = orchestrator.provider_available()
    );

    Ok(orchestrator)
}

pub async fn chat_from_config(
    config: &ChatConfig,
    gate: Arc<dyn AccessGate>,
) -> Result<ExchangeOrchestrator, ConfigError> {
    orchestrator_with(observed_provider(config)?, gate).await
}

/// Reads the environment once and wires an ungated orchestrator.
pub async fn chat_from_env() -> Result<ExchangeOrchestrator, ConfigError> {
    let config = ChatConfig::from_env()?;
    chat_from_config(&config, Arc::new(AlwaysAuthorized)).await
}
