//! Classified provider failures.
//!
//! ```rust
//! use mprovider::{ProviderError, ProviderErrorKind};
//!
//! let missing = ProviderError::configuration("no credential");
//! assert_eq!(missing.kind, ProviderErrorKind::Configuration);
//! assert!(!missing.retryable);
//!
//! let limited = ProviderError::rate_limited("wait a minute");
//! assert!(limited.retryable);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Shown when an endpoint rate-limits us. Recovery is waiting, not retrying.
pub const RATE_LIMIT_ADVISORY: &str = "Rate Limit erreicht. Warte eine Minute.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Credential absent; no call attempted.
    Configuration,
    /// The endpoint answered with a rate-limit status.
    RateLimited,
    /// The request was rejected before any call, e.g. an empty prompt.
    InvalidRequest,
    /// The endpoint answered with any other error payload.
    Provider,
    /// Transport failure without a structured endpoint response, including timeouts.
    Network,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
    /// Advisory only. Nothing in this workspace retries automatically.
    pub retryable: bool,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Configuration, message, false)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::RateLimited, message, true)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidRequest, message, false)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Provider, message, false)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Network, message, true)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Other, message, false)
    }

    /// A failure that carries no description, such as a panicking provider.
    pub fn unclassified() -> Self {
        Self::other("")
    }

    /// The human-readable text to show for this failure, if it carries any.
    pub fn surfaced_message(&self) -> Option<&str> {
        let message = self.message.trim();
        if message.is_empty() {
            None
        } else {
            Some(self.message.as_str())
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ProviderError {}
