#[cfg(feature = "provider-groq")]
pub mod groq;

#[cfg(feature = "provider-ollama")]
pub mod ollama;

/// Classifies a failure while reading a response body.
///
/// Timeouts and interrupted bodies are transport failures; only a payload
/// that arrived but would not decode is reported against the provider.
#[cfg(any(feature = "provider-groq", feature = "provider-ollama"))]
pub(crate) fn body_read_error(err: reqwest::Error, fallback: &str) -> crate::ProviderError {
    if err.is_timeout() || err.is_body() || err.is_request() || err.is_connect() {
        crate::ProviderError::network(err.to_string())
    } else {
        crate::ProviderError::provider(fallback)
    }
}
