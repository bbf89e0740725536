//! Provider identity and wire-neutral message types.
//!
//! ```rust
//! use mprovider::{Message, ProviderDescriptor, ProviderId, Role};
//!
//! let descriptor = ProviderDescriptor::new(ProviderId::Groq, "llama-3.3-70b-versatile");
//! assert_eq!(descriptor.to_string(), "groq/llama-3.3-70b-versatile");
//!
//! let message = Message::new(Role::User, "Hallo");
//! assert_eq!(message.role, Role::User);
//! ```

use std::fmt::{Display, Formatter};

use crate::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Groq,
    Ollama,
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Self::Groq => "groq",
            Self::Ollama => "ollama",
        };

        f.write_str(id)
    }
}

/// Which backend answers and with which model. Fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub id: ProviderId,
    pub model: String,
}

impl ProviderDescriptor {
    pub fn new(id: ProviderId, model: impl Into<String>) -> Self {
        Self {
            id,
            model: model.into(),
        }
    }
}

impl Display for ProviderDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.id, self.model)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

pub(crate) fn validate_prompt(prompt: &str) -> Result<(), ProviderError> {
    if prompt.trim().is_empty() {
        return Err(ProviderError::invalid_request("prompt must not be empty"));
    }

    Ok(())
}
