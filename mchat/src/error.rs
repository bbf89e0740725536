//! Chat-layer errors.
//!
//! Guard rejections (`EmptyInput`, `Unauthorized`, `Unavailable`, `Busy`)
//! leave the conversation untouched. Provider failures never surface here;
//! they become transcript entries instead.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    EmptyInput,
    Unauthorized,
    Unavailable,
    Busy,
    Store,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::EmptyInput, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Unauthorized, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Unavailable, message)
    }

    pub fn busy(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Busy, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Store, message)
    }

    /// True for guard rejections, which are no-ops on the conversation.
    pub fn is_rejection(&self) -> bool {
        self.kind != ChatErrorKind::Store
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}
