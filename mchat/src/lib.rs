//! Conversation model and exchange orchestration over a completion provider.

mod error;
mod gate;
mod hooks;
mod ids;
mod orchestrator;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        AccessGate, AlwaysAuthorized, ChatError, ChatErrorKind, ChatMessage, ChatSnapshot,
        ConversationStore, ExchangeHooks, ExchangeOrchestrator, ExchangeOrchestratorBuilder,
        ExchangeOutcome, ExchangeReport, ExchangeState, InMemoryConversationStore, MessageId,
        MessageRole, NoopExchangeHooks, SharedAccessGate,
    };
    pub use mcommon::SessionId;
}

pub use error::{ChatError, ChatErrorKind};
pub use gate::{AccessGate, AlwaysAuthorized, SharedAccessGate};
pub use hooks::{ExchangeHooks, NoopExchangeHooks};
pub use ids::MessageSequencer;
pub use mcommon::SessionId;
pub use orchestrator::{ExchangeOrchestrator, ExchangeOrchestratorBuilder};
pub use store::{ChatFuture, ConversationStore, InMemoryConversationStore};
pub use types::{
    ChatMessage, ChatSnapshot, ERROR_PREFIX, ExchangeIds, ExchangeOutcome, ExchangeReport,
    ExchangeState, MessageId, MessageRole, UNKNOWN_ERROR_MESSAGE, failure_text,
};
