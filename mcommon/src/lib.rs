//! Shared values used by the mixchat workspace crates.
//!
//! ```rust
//! use mcommon::{GenerationOptions, SessionId};
//!
//! let session = SessionId::from("browser-tab-1");
//! let options = GenerationOptions::default().with_temperature(0.7).with_max_tokens(500);
//!
//! assert_eq!(session.as_str(), "browser-tab-1");
//! assert_eq!(options.max_tokens, Some(500));
//! assert!(!options.stream);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use mcommon::BoxFuture;
    //!
    //! fn prompt_len<'a>(prompt: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { prompt.len() })
    //! }
    //!
    //! let _future = prompt_len("Hallo");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Host session identifier.

    use std::fmt::{Display, Formatter};

    /// Identifies the host session that owns a conversation.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Default for SessionId {
        fn default() -> Self {
            Self::new("default")
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod model {
    //! Generation settings sent with every completion request.
    //!
    //! ```rust
    //! use mcommon::GenerationOptions;
    //!
    //! let options = GenerationOptions::chat_defaults();
    //! assert_eq!(options.temperature, Some(0.7));
    //! assert_eq!(options.max_tokens, Some(500));
    //! assert!(!options.stream);
    //! ```

    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_MAX_TOKENS: u32 = 500;

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct GenerationOptions {
        pub temperature: Option<f32>,
        pub max_tokens: Option<u32>,
        pub stream: bool,
    }

    impl GenerationOptions {
        /// Fixed parameters used by the hosted chat-completions provider.
        pub fn chat_defaults() -> Self {
            Self::default()
                .with_temperature(DEFAULT_TEMPERATURE)
                .with_max_tokens(DEFAULT_MAX_TOKENS)
        }

        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = Some(max_tokens);
            self
        }
    }
}

pub use context::SessionId;
pub use future::BoxFuture;
pub use model::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, GenerationOptions};

#[cfg(test)]
mod tests {
    use super::{GenerationOptions, SessionId};

    #[test]
    fn session_id_round_trips_strings() {
        let session = SessionId::new("tab-1");
        assert_eq!(session.as_str(), "tab-1");
        assert_eq!(session.to_string(), "tab-1");
        assert_eq!(SessionId::default().as_str(), "default");
    }

    #[test]
    fn chat_defaults_are_non_streaming() {
        let options = GenerationOptions::chat_defaults();
        assert_eq!(options.temperature, Some(0.7));
        assert_eq!(options.max_tokens, Some(500));
        assert!(!options.stream);
    }
}
