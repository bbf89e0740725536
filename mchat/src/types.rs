//! Transcript messages, exchange state, and render snapshots.

use std::fmt::{Display, Formatter};
use std::time::{Duration, SystemTime};

use mprovider::{ProviderDescriptor, ProviderError};
use serde::Serialize;

pub const ERROR_PREFIX: &str = "Fehler: ";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unbekannter Fehler";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One transcript entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: SystemTime,
}

impl ChatMessage {
    pub fn new(
        id: MessageId,
        role: MessageRole,
        content: impl Into<String>,
        timestamp: SystemTime,
    ) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            timestamp,
        }
    }
}

/// The two ids reserved when an exchange starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeIds {
    pub user: MessageId,
    pub assistant: MessageId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeState {
    #[default]
    Idle,
    Sending {
        exchange: ExchangeIds,
    },
}

impl ExchangeState {
    pub fn is_sending(&self) -> bool {
        matches!(self, Self::Sending { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    Completed,
    Failed(ProviderError),
}

impl ExchangeOutcome {
    /// Transcript text for this outcome given the provider's reply text.
    pub(crate) fn transcript_text(&self, reply: String) -> String {
        match self {
            Self::Completed => reply,
            Self::Failed(error) => failure_text(error),
        }
    }
}

pub fn failure_text(error: &ProviderError) -> String {
    format!(
        "{ERROR_PREFIX}{}",
        error.surfaced_message().unwrap_or(UNKNOWN_ERROR_MESSAGE)
    )
}

/// Result of one settled exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeReport {
    pub ids: ExchangeIds,
    pub outcome: ExchangeOutcome,
    pub assistant_message: ChatMessage,
    pub elapsed: Duration,
    /// False when the conversation was cleared while the exchange was in flight.
    pub retained: bool,
}

/// What a renderer needs: transcript, busy flag, provider status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSnapshot {
    pub messages: Vec<ChatMessage>,
    pub busy: bool,
    pub provider_available: bool,
    pub provider: ProviderDescriptor,
}
