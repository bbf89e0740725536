//! Groq adapter types and conversions from the shared model.

use std::fmt::Formatter;

use mcommon::GenerationOptions;

use crate::{Message, Role, SecretString};

#[derive(Debug, Clone, PartialEq)]
pub struct GroqRequest {
    pub model: String,
    pub messages: Vec<GroqMessage>,
    pub options: GenerationOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroqMessage {
    pub role: GroqRole,
    pub content: String,
}

impl From<Message> for GroqMessage {
    fn from(value: Message) -> Self {
        Self {
            role: value.role.into(),
            content: value.content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroqRole {
    System,
    User,
    Assistant,
}

impl GroqRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl From<Role> for GroqRole {
    fn from(value: Role) -> Self {
        match value {
            Role::System => Self::System,
            Role::User => Self::User,
            Role::Assistant => Self::Assistant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroqResponse {
    pub model: String,
    pub content: String,
    pub finish_reason: Option<String>,
    pub usage: GroqUsage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroqUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Clone, PartialEq, Eq)]
pub enum GroqAuth {
    ApiKey(SecretString),
}

impl std::fmt::Debug for GroqAuth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("GroqAuth::ApiKey([REDACTED])"),
        }
    }
}
