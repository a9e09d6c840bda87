//! OpenRouter client (OpenAI-compatible chat completions).
//!
//! Single-shot chat, server-sent-event streaming and image generation share
//! one endpoint and one error mapping.

mod client;
mod dto;
mod sse;

pub use client::OpenRouterClient;
pub use dto::{ChatRequest, ChatRequestBuilder};
pub use sse::{SseDecoder, SseEvent};
