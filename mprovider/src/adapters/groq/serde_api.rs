//! Groq chat-completions payload models.

use serde::{Deserialize, Serialize};

use crate::ProviderError;

use super::transport::GROQ_FALLBACK_ERROR;
use super::types::{GroqMessage, GroqRequest, GroqResponse, GroqUsage};

pub(crate) fn build_api_request(request: GroqRequest) -> Result<GroqApiRequest, ProviderError> {
    if request.messages.is_empty() {
        return Err(ProviderError::invalid_request(
            "Groq request requires at least one message",
        ));
    }

    Ok(GroqApiRequest {
        model: request.model,
        messages: request
            .messages
            .into_iter()
            .map(GroqApiMessage::from)
            .collect(),
        temperature: request.options.temperature,
        max_tokens: request.options.max_tokens,
        stream: request.options.stream,
    })
}

/// Pulls `error.message` out of an error body, if the body has one.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<GroqApiErrorEnvelope>(body).ok()?;
    parsed
        .error
        .message
        .filter(|message| !message.trim().is_empty())
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroqApiErrorEnvelope {
    pub error: GroqApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroqApiError {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GroqApiRequest {
    pub model: String,
    pub messages: Vec<GroqApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct GroqApiMessage {
    pub role: &'static str,
    pub content: String,
}

impl From<GroqMessage> for GroqApiMessage {
    fn from(value: GroqMessage) -> Self {
        Self {
            role: value.role.as_str(),
            content: value.content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroqApiResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<GroqApiChoice>,
    pub usage: Option<GroqApiUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroqApiChoice {
    pub message: GroqApiAssistantMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroqApiAssistantMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroqApiUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TryFrom<GroqApiResponse> for GroqResponse {
    type Error = ProviderError;

    fn try_from(value: GroqApiResponse) -> Result<Self, Self::Error> {
        let choice = value
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::provider(GROQ_FALLBACK_ERROR))?;

        let usage = value
            .usage
            .map(|usage| GroqUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            })
            .unwrap_or_default();

        Ok(Self {
            model: value.model,
            content: choice.message.content.unwrap_or_default(),
            finish_reason: choice.finish_reason,
            usage,
        })
    }
}
