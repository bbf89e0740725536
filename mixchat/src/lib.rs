//! Unified facade over the mixchat workspace crates.
//!
//! Hosts normally depend on this crate alone: it reads configuration from the
//! environment, builds the selected provider, and wires an
//! [`ExchangeOrchestrator`] with tracing hooks.
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let chat = mixchat::chat_from_env().await?;
//! if chat.provider_available() {
//!     let report = chat.submit("Hallo").await?;
//!     println!("{}", report.assistant_message.content);
//! }
//! println!("{}", mixchat::status_line(&chat.snapshot()));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod prelude;
pub mod providers;
pub mod runtime;
pub mod util;

pub use mchat;
pub use mcommon;
pub use mobserve;
pub use mprovider;

pub use mchat::{
    AccessGate, AlwaysAuthorized, ChatError, ChatErrorKind, ChatMessage, ChatSnapshot,
    ConversationStore, ExchangeHooks, ExchangeIds, ExchangeOrchestrator,
    ExchangeOrchestratorBuilder, ExchangeOutcome, ExchangeReport, ExchangeState,
    InMemoryConversationStore, MessageId, MessageRole, NoopExchangeHooks, SharedAccessGate,
};
pub use mcommon::{BoxFuture, GenerationOptions, SessionId};
pub use mobserve::{
    MetricsObservabilityHooks, SafeExchangeHooks, SafeProviderHooks, TracingObservabilityHooks,
};
pub use mprovider::{
    CompletionProvider, NoopOperationHooks, ObservedProvider, ProviderDescriptor, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderId, ProviderOperationHooks, SecretString,
    SecureCredentialManager,
};

pub use config::{ChatConfig, ConfigError, ConfigErrorKind};
pub use providers::{ProviderBuildConfig, build_provider_with_config};
pub use runtime::{chat_from_config, chat_from_env, observed_provider, orchestrator_with};
pub use util::{is_error_entry, parse_provider_id, status_line};
