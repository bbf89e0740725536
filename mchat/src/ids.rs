//! Message id and timestamp allocation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;

use crate::{ChatMessage, ExchangeIds, MessageId};

/// Hands out strictly increasing ids and non-decreasing timestamps.
///
/// Ids come from a counter, so two exchanges submitted within the same clock
/// tick still get distinct ids. Timestamps are clamped so a clock stepping
/// backwards never reorders the transcript.
#[derive(Debug)]
pub struct MessageSequencer {
    next_id: AtomicU64,
    last_timestamp: Mutex<SystemTime>,
}

impl Default for MessageSequencer {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            last_timestamp: Mutex::new(SystemTime::UNIX_EPOCH),
        }
    }
}

impl MessageSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues after messages that are already stored: the next id is
    /// above `last_id` and no stamp is earlier than `last_timestamp`.
    pub fn starting_after(last_id: MessageId, last_timestamp: SystemTime) -> Self {
        Self {
            next_id: AtomicU64::new(last_id.get().saturating_add(1)),
            last_timestamp: Mutex::new(last_timestamp),
        }
    }

    /// A sequencer positioned after the newest of `messages`.
    pub fn resuming(messages: &[ChatMessage]) -> Self {
        let last_id = messages.iter().map(|message| message.id).max();
        let last_timestamp = messages.iter().map(|message| message.timestamp).max();
        match (last_id, last_timestamp) {
            (Some(last_id), Some(last_timestamp)) => Self::starting_after(last_id, last_timestamp),
            _ => Self::new(),
        }
    }

    pub fn reserve_exchange(&self) -> ExchangeIds {
        let first = self.next_id.fetch_add(2, Ordering::Relaxed);
        ExchangeIds {
            user: MessageId::new(first),
            assistant: MessageId::new(first + 1),
        }
    }

    pub fn stamp(&self) -> SystemTime {
        let now = SystemTime::now();
        let mut last = self
            .last_timestamp
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if now > *last {
            *last = now;
        }
        *last
    }
}
