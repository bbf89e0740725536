//! Groq transport trait and reqwest-based HTTP implementation.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use crate::adapters::body_read_error;
use crate::{ProviderError, ProviderFuture};

use super::serde_api::{GroqApiResponse, build_api_request, extract_error_message};
use super::types::{GroqAuth, GroqRequest, GroqResponse};

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const GROQ_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const GROQ_RATE_LIMIT_MESSAGE: &str = crate::RATE_LIMIT_ADVISORY;
pub const GROQ_FALLBACK_ERROR: &str = "Groq API Fehler";

pub trait GroqTransport: Send + Sync + std::fmt::Debug {
    fn complete<'a>(
        &'a self,
        request: GroqRequest,
        auth: GroqAuth,
    ) -> ProviderFuture<'a, Result<GroqResponse, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct GroqHttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl GroqHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: GROQ_BASE_URL.to_string(),
            timeout: GROQ_REQUEST_TIMEOUT,
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
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return ProviderError::rate_limited(GROQ_RATE_LIMIT_MESSAGE);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => return body_read_error(err, GROQ_FALLBACK_ERROR),
        };
        let message = extract_error_message(&body).unwrap_or_else(|| GROQ_FALLBACK_ERROR.to_string());
        ProviderError::provider(message)
    }
}

impl GroqTransport for GroqHttpTransport {
    fn complete<'a>(
        &'a self,
        request: GroqRequest,
        auth: GroqAuth,
    ) -> ProviderFuture<'a, Result<GroqResponse, ProviderError>> {
        Box::pin(async move {
            let api_request = build_api_request(request)?;
            let GroqAuth::ApiKey(api_key) = &auth;

            let response = self
                .client
                .post(self.endpoint("chat/completions"))
                .timeout(self.timeout)
                .bearer_auth(api_key.expose())
                .json(&api_request)
                .send()
                .await
                .map_err(|err| ProviderError::network(err.to_string()))?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let parsed: GroqApiResponse = response
                .json()
                .await
                .map_err(|err| body_read_error(err, GROQ_FALLBACK_ERROR))?;

            GroqResponse::try_from(parsed)
        })
    }
}
