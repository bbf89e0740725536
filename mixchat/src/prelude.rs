//! Common imports for most mixchat hosts.

pub use crate::{
    AccessGate, AlwaysAuthorized, ChatConfig, ChatError, ChatErrorKind, ChatMessage,
    ChatSnapshot, CompletionProvider, ConfigError, ExchangeOrchestrator, ExchangeOutcome,
    ExchangeReport, MessageRole, ProviderBuildConfig, ProviderDescriptor, ProviderError,
    ProviderErrorKind, ProviderId, SessionId, SharedAccessGate,
};
pub use crate::{
    build_provider_with_config, chat_from_config, chat_from_env, observed_provider,
    orchestrator_with, parse_provider_id, status_line,
};
