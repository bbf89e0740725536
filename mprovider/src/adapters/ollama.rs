//! Unauthenticated provider for a locally reachable Ollama service.
//!
//! Context and prompt are flattened into one text block because the
//! `/api/generate` endpoint takes a single prompt string.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::adapters::body_read_error;
use crate::model::validate_prompt;
use crate::{CompletionProvider, ProviderDescriptor, ProviderError, ProviderFuture, ProviderId};

pub const OLLAMA_HOST_URL: &str = "http://localhost:11434";
pub const OLLAMA_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const OLLAMA_FALLBACK_ERROR: &str = "Failed to generate response";
pub const OLLAMA_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaGenerateRequest {
    pub model: String,
    pub prompt: String,
}

pub trait OllamaTransport: Send + Sync + std::fmt::Debug {
    fn generate<'a>(
        &'a self,
        request: OllamaGenerateRequest,
    ) -> ProviderFuture<'a, Result<String, ProviderError>>;

    fn list_models<'a>(&'a self) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>>;
}

#[derive(Clone)]
pub struct OllamaProvider {
    transport: Arc<dyn OllamaTransport>,
    model: String,
}

impl OllamaProvider {
    pub fn new(transport: Arc<dyn OllamaTransport>) -> Self {
        Self {
            transport,
            model: OLLAMA_DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn default_http_transport(client: Client) -> OllamaHttpTransport {
        OllamaHttpTransport::new(client)
    }

    /// Models installed on the local service, sorted by name.
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        self.transport.list_models().await
    }

    pub(crate) fn build_request(&self, prompt: &str, context: &str) -> OllamaGenerateRequest {
        OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: compose_prompt(prompt, context),
        }
    }
}

impl CompletionProvider for OllamaProvider {
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor::new(ProviderId::Ollama, self.model.clone())
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        context: &'a str,
    ) -> ProviderFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            validate_prompt(prompt)?;
            self.transport
                .generate(self.build_request(prompt, context))
                .await
        })
    }

    fn check_health<'a>(&'a self) -> ProviderFuture<'a, bool> {
        Box::pin(async move { self.transport.list_models().await.is_ok() })
    }
}

impl std::fmt::Debug for OllamaProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaProvider")
            .field("transport", &self.transport)
            .field("model", &self.model)
            .finish()
    }
}

pub(crate) fn compose_prompt(prompt: &str, context: &str) -> String {
    if context.is_empty() {
        prompt.to_string()
    } else {
        format!("Context: {context}\n\nQuestion: {prompt}\n\nAnswer:")
    }
}

#[derive(Debug, Clone)]
pub struct OllamaHttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl OllamaHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: OLLAMA_HOST_URL.to_string(),
            timeout: OLLAMA_REQUEST_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn parse_error(response: Response) -> ProviderError {
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return ProviderError::rate_limited(crate::RATE_LIMIT_ADVISORY);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => return body_read_error(err, OLLAMA_FALLBACK_ERROR),
        };
        let message = serde_json::from_str::<OllamaErrorBody>(&body)
            .ok()
            .map(|parsed| parsed.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| OLLAMA_FALLBACK_ERROR.to_string());
        ProviderError::provider(message)
    }
}

impl OllamaTransport for OllamaHttpTransport {
    fn generate<'a>(
        &'a self,
        request: OllamaGenerateRequest,
    ) -> ProviderFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            let body = OllamaApiGenerateRequest {
                model: request.model,
                prompt: request.prompt,
                stream: false,
            };

            let response = self
                .client
                .post(self.endpoint("generate"))
                .timeout(self.timeout)
                .json(&body)
                .send()
                .await
                .map_err(|err| ProviderError::network(err.to_string()))?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let parsed = response
                .json::<OllamaApiGenerateResponse>()
                .await
                .map_err(|err| body_read_error(err, OLLAMA_FALLBACK_ERROR))?;

            Ok(parsed.response)
        })
    }

    fn list_models<'a>(&'a self) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.endpoint("tags"))
                .timeout(self.timeout)
                .send()
                .await
                .map_err(|err| ProviderError::network(err.to_string()))?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let parsed = response
                .json::<OllamaTagsResponse>()
                .await
                .map_err(|err| body_read_error(err, OLLAMA_FALLBACK_ERROR))?;

            let mut names = parsed
                .models
                .into_iter()
                .map(|model| model.name)
                .collect::<Vec<_>>();
            names.sort();
            Ok(names)
        })
    }
}

#[derive(Debug, Serialize)]
struct OllamaApiGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaApiGenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct OllamaErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<OllamaModelTag>,
}

#[derive(Debug, Deserialize)]
struct OllamaModelTag {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_prompt_passes_raw_prompt_without_context() {
        assert_eq!(compose_prompt("Hallo", ""), "Hallo");
    }

    #[test]
    fn compose_prompt_flattens_context_and_question() {
        assert_eq!(
            compose_prompt("Wer bist du?", "Du bist ein Assistent."),
            "Context: Du bist ein Assistent.\n\nQuestion: Wer bist du?\n\nAnswer:"
        );
    }

    #[test]
    fn endpoint_joins_api_paths() {
        let transport =
            OllamaHttpTransport::new(Client::new()).with_base_url("http://127.0.0.1:11434/");
        assert_eq!(
            transport.endpoint("generate"),
            "http://127.0.0.1:11434/api/generate"
        );
        assert_eq!(transport.endpoint("tags"), "http://127.0.0.1:11434/api/tags");
    }

    #[test]
    fn generate_body_is_non_streaming() {
        let body = OllamaApiGenerateRequest {
            model: "mistral:7b-instruct".to_string(),
            prompt: "Hallo".to_string(),
            stream: false,
        };
        let json = serde_json::to_string(&body).expect("serialize");
        assert_eq!(
            json,
            r#"{"model":"mistral:7b-instruct","prompt":"Hallo","stream":false}"#
        );
    }
}
