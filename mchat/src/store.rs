//! Conversation storage contract and the in-memory implementation.

use std::sync::Mutex;

use crate::{ChatError, ChatMessage};

pub type ChatFuture<'a, T> = mcommon::BoxFuture<'a, T>;

/// Append-only ordered log of messages, cleared only as a whole.
pub trait ConversationStore: Send + Sync {
    fn messages<'a>(&'a self) -> ChatFuture<'a, Result<Vec<ChatMessage>, ChatError>>;

    fn append<'a>(&'a self, message: ChatMessage) -> ChatFuture<'a, Result<(), ChatError>>;

    /// Removes every message and returns how many were removed.
    fn clear<'a>(&'a self) -> ChatFuture<'a, Result<usize, ChatError>>;
}

#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn messages<'a>(&'a self) -> ChatFuture<'a, Result<Vec<ChatMessage>, ChatError>> {
        Box::pin(async move {
            let messages = self
                .messages
                .lock()
                .map_err(|_| ChatError::store("conversation store lock poisoned"))?;

            Ok(messages.clone())
        })
    }

    fn append<'a>(&'a self, message: ChatMessage) -> ChatFuture<'a, Result<(), ChatError>> {
        Box::pin(async move {
            let mut messages = self
                .messages
                .lock()
                .map_err(|_| ChatError::store("conversation store lock poisoned"))?;

            if let Some(last) = messages.last()
                && (message.timestamp < last.timestamp || message.id <= last.id)
            {
                return Err(ChatError::store(format!(
                    "message {} would be stored out of order after {}",
                    message.id, last.id
                )));
            }

            messages.push(message);
            Ok(())
        })
    }

    fn clear<'a>(&'a self) -> ChatFuture<'a, Result<usize, ChatError>> {
        Box::pin(async move {
            let mut messages = self
                .messages
                .lock()
                .map_err(|_| ChatError::store("conversation store lock poisoned"))?;

            let removed = messages.len();
            messages.clear();
            Ok(removed)
        })
    }
}
