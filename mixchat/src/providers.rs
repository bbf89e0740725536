//! Provider construction for facade consumers.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::{ChatConfig, CompletionProvider, ProviderError, ProviderId};

#[derive(Debug, Clone)]
pub struct ProviderBuildConfig {
    pub provider_id: ProviderId,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout: Duration,
}

impl ProviderBuildConfig {
    pub fn new(provider_id: ProviderId) -> Self {
        Self {
            provider_id,
            api_key: None,
            base_url: None,
            model: None,
            timeout: crate::config::DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Settings for the provider selected in `config`.
    pub fn from_chat_config(config: &ChatConfig) -> Self {
        let base = Self::new(config.provider).with_timeout(config.request_timeout);
        match config.provider {
            ProviderId::Groq => {
                let base = base
                    .with_base_url(config.groq_api_url.clone())
                    .with_model(config.groq_model.clone());
                match &config.groq_api_key {
                    Some(api_key) => base.with_api_key(api_key.expose()),
                    None => base,
                }
            }
            ProviderId::Ollama => base
                .with_base_url(config.ollama_api_url.clone())
                .with_model(config.ollama_model.clone()),
        }
    }
}

/// Builds the configured provider.
///
/// A missing or blank Groq key is not an error: the provider is built and
/// reports itself unavailable, which keeps submit disabled.
pub fn build_provider_with_config(
    config: ProviderBuildConfig,
) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    let http = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|err| ProviderError::network(err.to_string()))?;

    match config.provider_id {
        ProviderId::Groq => build_groq_provider(config, http),
        ProviderId::Ollama => build_ollama_provider(config, http),
    }
}

#[cfg(feature = "provider-groq")]
fn build_groq_provider(
    config: ProviderBuildConfig,
    http: Client,
) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    use mprovider::SecureCredentialManager;
    use mprovider::adapters::groq::{GroqHttpTransport, GroqProvider};

    let credentials = Arc::new(SecureCredentialManager::new());
    if let Some(api_key) = config.api_key.filter(|key| !key.trim().is_empty()) {
        credentials.set_groq_api_key(api_key)?;
    }

    let mut transport = GroqHttpTransport::new(http).with_timeout(config.timeout);
    if let Some(base_url) = config.base_url {
        transport = transport.with_base_url(base_url);
    }

    let mut provider = GroqProvider::new(credentials, Arc::new(transport));
    if let Some(model) = config.model {
        provider = provider.with_model(model);
    }

    Ok(Arc::new(provider))
}

#[cfg(not(feature = "provider-groq"))]
fn build_groq_provider(
    _config: ProviderBuildConfig,
    _http: Client,
) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    Err(ProviderError::configuration(
        "provider-groq feature is not enabled on mixchat",
    ))
}

#[cfg(feature = "provider-ollama")]
fn build_ollama_provider(
    config: ProviderBuildConfig,
    http: Client,
) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    use mprovider::adapters::ollama::OllamaProvider;

    let mut transport = OllamaProvider::default_http_transport(http).with_timeout(config.timeout);
    if let Some(base_url) = config.base_url {
        transport = transport.with_base_url(base_url);
    }

    let mut provider = OllamaProvider::new(Arc::new(transport));
    if let Some(model) = config.model {
        provider = provider.with_model(model);
    }

    Ok(Arc::new(provider))
}

#[cfg(not(feature = "provider-ollama"))]
fn build_ollama_provider(
    _config: ProviderBuildConfig,
    _http: Client,
) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    Err(ProviderError::configuration(
        "provider-ollama feature is not enabled on mixchat",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderDescriptor;

    #[cfg(feature = "provider-groq")]
    #[test]
    fn groq_without_key_is_built_but_unavailable() {
        let provider = build_provider_with_config(ProviderBuildConfig::new(ProviderId::Groq))
            .expect("provider builds");

        assert!(!provider.is_available());
        assert_eq!(
            provider.descriptor(),
            ProviderDescriptor::new(ProviderId::Groq, "llama-3.3-70b-versatile")
        );
    }

    #[cfg(feature = "provider-groq")]
    #[test]
    fn groq_with_key_and_model_is_available() {
        let provider = build_provider_with_config(
            ProviderBuildConfig::new(ProviderId::Groq)
                .with_api_key("  gsk_test  ")
                .with_model("mixtral-8x7b-32768"),
        )
        .expect("provider builds");

        assert!(provider.is_available());
        assert_eq!(provider.descriptor().model, "mixtral-8x7b-32768");
    }

    #[cfg(feature = "provider-groq")]
    #[test]
    fn blank_groq_key_counts_as_missing() {
        let provider = build_provider_with_config(
            ProviderBuildConfig::new(ProviderId::Groq).with_api_key("   "),
        )
        .expect("provider builds");

        assert!(!provider.is_available());
    }

    #[cfg(feature = "provider-ollama")]
    #[test]
    fn ollama_needs_no_credential() {
        let provider = build_provider_with_config(
            ProviderBuildConfig::new(ProviderId::Ollama).with_model("llama3"),
        )
        .expect("provider builds");

        assert!(provider.is_available());
        assert_eq!(provider.descriptor().to_string(), "ollama/llama3");
    }

    #[test]
    fn chat_config_selects_matching_endpoint_and_model() {
        let config = ChatConfig::default()
            .with_groq_api_key("gsk_test")
            .with_provider(ProviderId::Groq);
        let build = ProviderBuildConfig::from_chat_config(&config);
        assert_eq!(build.base_url.as_deref(), Some("https://api.groq.com/openai/v1"));
        assert_eq!(build.api_key.as_deref(), Some("gsk_test"));

        let build = ProviderBuildConfig::from_chat_config(&config.with_provider(ProviderId::Ollama));
        assert_eq!(build.base_url.as_deref(), Some("http://localhost:11434"));
        assert_eq!(build.api_key, None);
    }
}
