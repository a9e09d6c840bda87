//! The interface between the orchestrator and a hosted model provider.

use async_trait::async_trait;
use futures_util::Stream;
use serde::{Deserialize, Serialize};
use sparkcaption_core::{ChatMessage, StreamChunk};
use sparkcaption_error::SparkResult;
use std::pin::Pin;

/// A lazy, finite, single-consumer sequence of stream chunks.
///
/// Dropping it before the end closes the underlying connection.
pub type ChatStream = Pin<Box<dyn Stream<Item = SparkResult<StreamChunk>> + Send>>;

/// A provider response body, untouched.
///
/// Shapes vary between models and providers, so nothing is assumed here;
/// see [`crate::normalize_response`] for the decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::From)]
#[serde(transparent)]
pub struct RawResponse(serde_json::Value);

impl RawResponse {
    /// Wraps a JSON value.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// The JSON body.
    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Consumes the wrapper.
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

/// Extra options for streaming requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamOptions {
    /// Ask the provider to append a usage chunk at the end of the stream
    pub include_usage: bool,
}

impl StreamOptions {
    /// Options requesting a final usage chunk.
    pub fn with_usage() -> Self {
        Self {
            include_usage: true,
        }
    }
}

/// Minimal interface to a hosted chat-completion provider.
///
/// Implementations hold no state between calls.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;

    /// Single-shot chat completion. Returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns a provider error on transport failure or a non-success status.
    async fn send_chat(&self, model: &str, messages: &[ChatMessage]) -> SparkResult<RawResponse>;

    /// Streaming chat completion.
    ///
    /// # Errors
    ///
    /// Fails if the stream cannot be opened; failures mid-stream are yielded
    /// as `Err` items.
    async fn stream_chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: StreamOptions,
    ) -> SparkResult<ChatStream>;

    /// Generates images for a prompt. Returns zero or more image URLs.
    ///
    /// # Errors
    ///
    /// Returns a provider error on transport failure or a non-success status.
    async fn generate_image(&self, prompt: &str) -> SparkResult<Vec<String>>;
}
