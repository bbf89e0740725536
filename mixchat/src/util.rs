//! Small convenience helpers for hosts.

use mchat::{ChatMessage, ChatSnapshot, MessageRole};
use mprovider::ProviderId;

pub fn parse_provider_id(value: &str) -> Option<ProviderId> {
    match value.trim().to_ascii_lowercase().as_str() {
        "groq" | "hosted" => Some(ProviderId::Groq),
        "ollama" | "local" => Some(ProviderId::Ollama),
        _ => None,
    }
}

/// One-line provider status, e.g. `groq/llama-3.3-70b-versatile (online)`.
pub fn status_line(snapshot: &ChatSnapshot) -> String {
    let status = if snapshot.provider_available {
        "online"
    } else {
        "offline"
    };
    if snapshot.busy {
        format!("{} ({status}, waiting for reply)", snapshot.provider)
    } else {
        format!("{} ({status})", snapshot.provider)
    }
}

pub fn is_error_entry(message: &ChatMessage) -> bool {
    message.role == MessageRole::Assistant && message.content.starts_with(mchat::ERROR_PREFIX)
}
