mod auth;
mod provider;
mod serde_api;
mod transport;
mod types;

pub use provider::{GROQ_DEFAULT_MODEL, GroqProvider};
pub use transport::{
    GROQ_BASE_URL, GROQ_FALLBACK_ERROR, GROQ_RATE_LIMIT_MESSAGE, GROQ_REQUEST_TIMEOUT,
    GroqHttpTransport, GroqTransport,
};
pub use types::{GroqAuth, GroqMessage, GroqRequest, GroqResponse, GroqRole, GroqUsage};
