//! Startup configuration read once from the process environment.
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use mixchat::{ChatConfig, ProviderId};
//!
//! let env = HashMap::from([
//!     ("VITE_GROQ_API_KEY", "gsk_example"),
//!     ("MIXCHAT_REQUEST_TIMEOUT_SECS", "10"),
//! ]);
//! let config = ChatConfig::from_lookup(|key| env.get(key).map(|value| value.to_string()))
//!     .expect("valid configuration");
//!
//! assert_eq!(config.provider, ProviderId::Groq);
//! assert!(config.groq_api_key.is_some());
//! assert_eq!(config.request_timeout.as_secs(), 10);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use mchat::ChatError;
use mprovider::{ProviderError, ProviderId, SecretString};
use reqwest::Url;

use crate::util::parse_provider_id;

pub const PROVIDER_VAR: &str = "MIXCHAT_PROVIDER";
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";
pub const GROQ_API_KEY_ALIAS_VAR: &str = "VITE_GROQ_API_KEY";
pub const GROQ_API_URL_VAR: &str = "GROQ_API_URL";
pub const GROQ_MODEL_VAR: &str = "GROQ_MODEL";
pub const REQUEST_TIMEOUT_VAR: &str = "MIXCHAT_REQUEST_TIMEOUT_SECS";
pub const OLLAMA_API_URL_VAR: &str = "OLLAMA_API_URL";
pub const OLLAMA_MODEL_VAR: &str = "OLLAMA_MODEL";

pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_OLLAMA_API_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    InvalidValue,
    Provider,
    Chat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub message: String,
}

impl ConfigError {
    pub fn new(kind: ConfigErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_value(key: &str, message: impl Display) -> Self {
        Self::new(ConfigErrorKind::InvalidValue, format!("{key}: {message}"))
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ConfigError {}

impl From<ProviderError> for ConfigError {
    fn from(error: ProviderError) -> Self {
        Self::new(ConfigErrorKind::Provider, error.to_string())
    }
}

impl From<ChatError> for ConfigError {
    fn from(error: ChatError) -> Self {
        Self::new(ConfigErrorKind::Chat, error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub provider: ProviderId,
    /// `None` leaves the hosted provider unavailable; submit is then rejected.
    pub groq_api_key: Option<SecretString>,
    pub groq_api_url: String,
    pub groq_model: String,
    pub request_timeout: Duration,
    pub ollama_api_url: String,
    pub ollama_model: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider: ProviderId::Groq,
            groq_api_key: None,
            groq_api_url: DEFAULT_GROQ_API_URL.to_string(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            ollama_api_url: DEFAULT_OLLAMA_API_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let provider = match read(PROVIDER_VAR) {
            Some(value) => parse_provider_id(&value).ok_or_else(|| {
                ConfigError::invalid_value(PROVIDER_VAR, format!("unknown provider '{value}'"))
            })?,
            None => ProviderId::Groq,
        };

        let groq_api_key = read(GROQ_API_KEY_VAR)
            .or_else(|| read(GROQ_API_KEY_ALIAS_VAR))
            .map(SecretString::new);
        if provider == ProviderId::Groq && groq_api_key.is_none() {
            tracing::warn!(
                phase = "config",
                event = "missing_credential",
                provider = %provider,
                "Groq API key is not configured; submit stays disabled"
            );
        }

        let request_timeout = match read(REQUEST_TIMEOUT_VAR) {
            Some(value) => parse_timeout(&value)?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            provider,
            groq_api_key,
            groq_api_url: read_url(&read, GROQ_API_URL_VAR, DEFAULT_GROQ_API_URL)?,
            groq_model: read(GROQ_MODEL_VAR).unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            request_timeout,
            ollama_api_url: read_url(&read, OLLAMA_API_URL_VAR, DEFAULT_OLLAMA_API_URL)?,
            ollama_model: read(OLLAMA_MODEL_VAR)
                .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
        })
    }

    pub fn with_provider(mut self, provider: ProviderId) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_groq_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.groq_api_key = Some(SecretString::new(api_key));
        self
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    let seconds = value
        .parse::<u64>()
        .map_err(|err| ConfigError::invalid_value(REQUEST_TIMEOUT_VAR, err))?;
    if seconds == 0 {
        return Err(ConfigError::invalid_value(
            REQUEST_TIMEOUT_VAR,
            "timeout must be at least one second",
        ));
    }

    Ok(Duration::from_secs(seconds))
}

fn read_url(
    read: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    let Some(value) = read(key) else {
        return Ok(default.to_string());
    };

    let url = Url::parse(&value).map_err(|err| ConfigError::invalid_value(key, err))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid_value(
            key,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(value.trim_end_matches('/').to_string())
}
