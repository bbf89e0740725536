//! Completion provider clients with a shared failure taxonomy.
//!
//! Every backend implements [`CompletionProvider`]: one prompt (plus optional
//! context) in, completion text or a classified [`ProviderError`] out.

pub mod adapters;
mod credentials;
mod error;
mod hooks;
mod model;
pub mod prelude;
mod provider;

pub use credentials::{SecretString, SecureCredentialManager};
pub use error::{ProviderError, ProviderErrorKind, RATE_LIMIT_ADVISORY};
pub use hooks::{NoopOperationHooks, ObservedProvider, ProviderOperationHooks};
pub use model::{Message, ProviderDescriptor, ProviderId, Role};
pub use provider::{CompletionProvider, ProviderFuture};
