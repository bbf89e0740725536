//! Groq provider over the chat-completions transport.

use std::sync::Arc;

use mcommon::GenerationOptions;

use crate::model::validate_prompt;
use crate::{
    CompletionProvider, Message, ProviderDescriptor, ProviderError, ProviderFuture, ProviderId,
    Role, SecureCredentialManager,
};

use super::auth::resolve_groq_auth;
use super::transport::GroqTransport;
use super::types::{GroqMessage, GroqRequest};

pub const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

#[derive(Clone)]
pub struct GroqProvider {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn GroqTransport>,
    model: String,
    options: GenerationOptions,
}

impl GroqProvider {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn GroqTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
            model: GROQ_DEFAULT_MODEL.to_string(),
            options: GenerationOptions::chat_defaults(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// A system message carrying `context` precedes the prompt when context is non-empty.
    pub(crate) fn build_groq_request(&self, prompt: &str, context: &str) -> GroqRequest {
        let mut messages = Vec::with_capacity(2);
        if !context.is_empty() {
            messages.push(Message::new(Role::System, context));
        }
        messages.push(Message::new(Role::User, prompt));

        GroqRequest {
            model: self.model.clone(),
            messages: messages.into_iter().map(GroqMessage::from).collect(),
            options: self.options,
        }
    }
}

impl CompletionProvider for GroqProvider {
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor::new(ProviderId::Groq, self.model.clone())
    }

    fn is_available(&self) -> bool {
        self.credentials
            .has_credentials(ProviderId::Groq)
            .unwrap_or(false)
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        context: &'a str,
    ) -> ProviderFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            let auth = resolve_groq_auth(&self.credentials)?;
            validate_prompt(prompt)?;

            let request = self.build_groq_request(prompt, context);
            let response = self.transport.complete(request, auth).await?;
            Ok(response.content)
        })
    }
}

impl std::fmt::Debug for GroqProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqProvider")
            .field("transport", &self.transport)
            .field("model", &self.model)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
