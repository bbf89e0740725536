//! Common `mprovider` imports for downstream crates.

pub use crate::{
    CompletionProvider, NoopOperationHooks, ObservedProvider, ProviderDescriptor, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderId, ProviderOperationHooks, SecureCredentialManager,
};
pub use mcommon::BoxFuture;
