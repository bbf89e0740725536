//! Groq credential helpers and auth resolution.

use crate::{ProviderError, ProviderId, SecureCredentialManager};

use super::types::GroqAuth;

pub(crate) const MISSING_KEY_MESSAGE: &str = "Groq API Key nicht konfiguriert";

impl SecureCredentialManager {
    /// Stores a Groq API key. Surrounding whitespace is stripped.
    pub fn set_groq_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = api_key.into();
        self.set_api_key(ProviderId::Groq, api_key.trim())
    }
}

/// Resolves the bearer credential, failing before any network call when absent.
pub(crate) fn resolve_groq_auth(
    credentials: &SecureCredentialManager,
) -> Result<GroqAuth, ProviderError> {
    match credentials.api_key(ProviderId::Groq)? {
        Some(api_key) => Ok(GroqAuth::ApiKey(api_key)),
        None => Err(ProviderError::configuration(MISSING_KEY_MESSAGE)),
    }
}
