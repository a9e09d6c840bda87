//! Provider integration for SparkCaption.
//!
//! - [`ContentProvider`]: the minimal interface the orchestrator needs
//! - [`OpenRouterClient`]: the OpenRouter implementation (chat, streaming, images)
//! - [`retry_on_rate_limit`]: bounded exponential backoff for HTTP 429
//! - [`normalize_response`]: turns whatever the provider returned into content

mod config;
mod normalize;
mod openrouter;
mod provider;
mod retry;

pub use config::{
    API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, LEGACY_API_KEY_ENV,
    ProviderConfig,
};
pub use normalize::{ResponseText, normalize_response, parse_structured};
pub use openrouter::{ChatRequest, ChatRequestBuilder, OpenRouterClient, SseDecoder, SseEvent};
pub use provider::{ChatStream, ContentProvider, RawResponse, StreamOptions};
pub use retry::{RetryConfig, retry_on_rate_limit};
