//! Observability hooks for provider calls and chat exchanges.
//!
//! ```rust
//! use mobserve::{MetricsObservabilityHooks, SafeExchangeHooks, SafeProviderHooks, TracingObservabilityHooks};
//!
//! let _provider_hooks = SafeProviderHooks::new(TracingObservabilityHooks);
//! let _exchange_hooks = SafeExchangeHooks::new(MetricsObservabilityHooks);
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeExchangeHooks, SafeProviderHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeExchangeHooks, SafeProviderHooks,
        TracingObservabilityHooks,
    };
}
