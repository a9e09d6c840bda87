//! Data transfer objects for the OpenRouter chat completions API.

use crate::StreamOptions;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use sparkcaption_core::{ChatMessage, ImageUrl, StreamChunk, StreamUsage};

/// Chat completion request body.
#[derive(Debug, Clone, Serialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<ChatMessage>,
    /// Enable streaming
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
    /// Streaming options
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    stream_options: Option<StreamOptions>,
    /// Output modalities, e.g. `["image", "text"]`
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    modalities: Option<Vec<String>>,
}

impl ChatRequest {
    /// Creates a new builder for ChatRequest.
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }
}

/// Error body returned by OpenRouter, either with a non-success status or
/// in place of `choices`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Numeric code, when the provider sent one (as number or string).
    pub fn status(&self) -> Option<u16> {
        match self.code.as_ref()? {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// Image generation response, decoded leniently.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ImageResponse {
    #[serde(default)]
    pub choices: Option<Vec<ImageChoice>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ImageChoice {
    #[serde(default)]
    pub message: Option<ImageMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ImageMessage {
    #[serde(default)]
    pub images: Option<Vec<GeneratedImage>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct GeneratedImage {
    #[serde(default)]
    pub image_url: Option<ImageUrl>,
}

impl ImageResponse {
    /// Image URLs from the first choice, in order.
    pub fn urls(self) -> Vec<String> {
        self.choices
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.images)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|image| image.image_url.map(|u| u.url))
            .filter(|url| !url.is_empty())
            .collect()
    }
}

/// One `data:` payload of a streaming response.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StreamEvent {
    #[serde(default)]
    pub choices: Option<Vec<StreamChoice>>,
    #[serde(default)]
    pub usage: Option<WireUsage>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StreamChoice {
    #[serde(default)]
    pub delta: Option<StreamDelta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StreamDelta {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct WireUsage {
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
    #[serde(default)]
    pub completion_tokens: Option<u64>,
    #[serde(default)]
    pub total_tokens: Option<u64>,
    #[serde(default)]
    pub reasoning_tokens: Option<u64>,
    #[serde(default)]
    pub completion_tokens_details: Option<CompletionTokensDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CompletionTokensDetails {
    #[serde(default)]
    pub reasoning_tokens: Option<u64>,
}

impl From<WireUsage> for StreamUsage {
    fn from(usage: WireUsage) -> Self {
        StreamUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
            reasoning_tokens: usage
                .reasoning_tokens
                .or_else(|| usage.completion_tokens_details.and_then(|d| d.reasoning_tokens)),
        }
    }
}

impl From<StreamEvent> for StreamChunk {
    fn from(event: StreamEvent) -> Self {
        StreamChunk {
            delta_content: event
                .choices
                .unwrap_or_default()
                .into_iter()
                .next()
                .and_then(|choice| choice.delta)
                .and_then(|delta| delta.content),
            usage: event.usage.map(StreamUsage::from),
        }
    }
}
