//! In-memory credential storage with redacted debug output.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::{ProviderError, ProviderId};

#[derive(Clone, PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // Zero bytes keep the buffer valid UTF-8.
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

#[derive(Default)]
pub struct SecureCredentialManager {
    credentials: Mutex<HashMap<ProviderId, SecretString>>,
}

impl SecureCredentialManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_api_key(
        &self,
        provider: ProviderId,
        api_key: impl Into<String>,
    ) -> Result<(), ProviderError> {
        let api_key = SecretString::new(api_key);
        if api_key.expose().trim().is_empty() {
            return Err(ProviderError::configuration("api key must not be empty"));
        }

        self.credentials_guard()?.insert(provider, api_key);
        Ok(())
    }

    pub fn api_key(&self, provider: ProviderId) -> Result<Option<SecretString>, ProviderError> {
        Ok(self.credentials_guard()?.get(&provider).cloned())
    }

    pub fn has_credentials(&self, provider: ProviderId) -> Result<bool, ProviderError> {
        Ok(self.credentials_guard()?.contains_key(&provider))
    }

    pub fn clear(&self, provider: ProviderId) -> Result<bool, ProviderError> {
        Ok(self.credentials_guard()?.remove(&provider).is_some())
    }

    fn credentials_guard(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<ProviderId, SecretString>>, ProviderError> {
        self.credentials
            .lock()
            .map_err(|_| ProviderError::other("credential manager lock poisoned"))
    }
}

impl std::fmt::Debug for SecureCredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureCredentialManager")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;

    #[test]
    fn secret_debug_output_is_redacted() {
        let secret = SecretString::new("gsk_live_123");
        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(secret.expose(), "gsk_live_123");
    }

    #[test]
    fn dropping_a_secret_leaves_its_clones_intact() {
        let original = SecretString::new("gsk_live_123");
        let copy = original.clone();
        drop(original);

        assert_eq!(copy.expose(), "gsk_live_123");
    }

    #[test]
    fn manager_stores_and_clears_keys_per_provider() {
        let manager = SecureCredentialManager::new();
        assert!(!manager.has_credentials(ProviderId::Groq).expect("lock"));

        manager
            .set_api_key(ProviderId::Groq, "gsk_test")
            .expect("key should set");
        assert!(manager.has_credentials(ProviderId::Groq).expect("lock"));
        assert!(!manager.has_credentials(ProviderId::Ollama).expect("lock"));
        assert_eq!(
            manager
                .api_key(ProviderId::Groq)
                .expect("lock")
                .expect("key present")
                .expose(),
            "gsk_test"
        );

        assert!(manager.clear(ProviderId::Groq).expect("lock"));
        assert!(!manager.clear(ProviderId::Groq).expect("lock"));
    }

    #[test]
    fn manager_rejects_blank_keys() {
        let manager = SecureCredentialManager::new();
        let error = manager
            .set_api_key(ProviderId::Groq, "   ")
            .expect_err("blank key must fail");
        assert_eq!(error.kind, ProviderErrorKind::Configuration);
    }
}
